//! Behavioural tests for the 2048 engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_2048::rules::{is_terminal, slide_row};
use strictly_2048::{Board, Direction, Game, GameState, is_valid_cell};

/// Builds a state from rows with the given score.
fn state(rows: Vec<Vec<u64>>, score: u64) -> GameState {
    GameState::from_board(Board::from_rows(rows).expect("valid board"), score)
}

/// Random board with roughly half the cells filled with small tiles.
fn random_board(rng: &mut StdRng, size: usize) -> Board {
    let rows = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        0
                    } else {
                        1u64 << rng.gen_range(1u32..5)
                    }
                })
                .collect()
        })
        .collect();
    Board::from_rows(rows).expect("valid board")
}

/// Slides a board column by column or with reversed rows, without rotating.
fn direct_slide(board: &Board, direction: Direction) -> (Vec<Vec<u64>>, u64) {
    let n = board.size();
    let mut out = vec![vec![0; n]; n];
    let mut gained = 0;
    for line in 0..n {
        let coords: Vec<(usize, usize)> = match direction {
            Direction::Left => (0..n).map(|c| (line, c)).collect(),
            Direction::Right => (0..n).rev().map(|c| (line, c)).collect(),
            Direction::Up => (0..n).map(|r| (r, line)).collect(),
            Direction::Down => (0..n).rev().map(|r| (r, line)).collect(),
        };
        let values: Vec<u64> = coords
            .iter()
            .map(|&(r, c)| board.get(r, c).expect("in bounds"))
            .collect();
        let (slid, g) = slide_row(&values);
        gained += g;
        for (&(r, c), v) in coords.iter().zip(slid) {
            out[r][c] = v;
        }
    }
    (out, gained)
}

#[test]
fn test_rotation_reduction_matches_direct_slides() {
    let mut rng = StdRng::seed_from_u64(31);
    for size in 2..=6 {
        for _ in 0..50 {
            let board = random_board(&mut rng, size);
            for direction in Direction::ALL {
                let slide = board.slide(direction);
                let (expected, gained) = direct_slide(&board, direction);
                assert_eq!(slide.board().rows(), expected, "{direction} on\n{board}");
                assert_eq!(*slide.gained(), gained);
            }
        }
    }
}

#[test]
fn test_score_delta_equals_merged_values() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut s = state(
        vec![
            vec![2, 2, 2, 2],
            vec![4, 4, 4, 4],
            vec![2, 0, 2, 2],
            vec![0, 0, 0, 0],
        ],
        100,
    );
    assert!(s.apply_move(Direction::Left, &mut rng));
    assert_eq!(s.score(), 100 + 8 + 16 + 4);
    assert_eq!(s.board().row(0), &[4, 4, 0, 0]);
    assert_eq!(s.board().row(1), &[8, 8, 0, 0]);
    assert_eq!(s.board().row(2), &[4, 2, 0, 0]);
}

#[test]
fn test_unchanged_move_is_bit_identical() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut s = state(
        vec![
            vec![2, 4, 8, 16],
            vec![4, 8, 16, 32],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ],
        64,
    );
    let before = s.clone();
    assert!(!s.apply_move(Direction::Left, &mut rng));
    assert!(!s.apply_move(Direction::Right, &mut rng));
    assert!(!s.apply_move(Direction::Up, &mut rng));
    assert_eq!(s, before);
    assert!(s.apply_move(Direction::Down, &mut rng));
}

#[test]
fn test_random_play_keeps_tiles_valid_and_score_monotonic() {
    for seed in 0..20 {
        let mut game = Game::seeded(4, seed);
        let mut rng = StdRng::seed_from_u64(seed + 1000);
        let mut last_score = 0;
        for _ in 0..500 {
            let direction = Direction::ALL[rng.gen_range(0..4)];
            let before = game.status();
            let changed = game.make_move(direction);
            let after = game.status();
            if !changed {
                assert_eq!(before, after);
            }
            assert!(after.score >= last_score);
            last_score = after.score;
            assert!(after.board.iter().flatten().all(|&v| is_valid_cell(v)));
            assert_eq!(after.terminal, is_terminal(game.state().board()));
        }
    }
}

#[test]
fn test_terminal_game_stays_terminal() {
    let mut game = Game::seeded(2, 3);
    let mut rng = StdRng::seed_from_u64(4);
    let mut moves = 0;
    while !game.state().is_terminal() && moves < 10_000 {
        game.make_move(Direction::ALL[rng.gen_range(0..4)]);
        moves += 1;
    }
    assert!(game.state().is_terminal(), "2x2 game should end quickly");

    let frozen = game.status();
    for direction in Direction::ALL {
        assert!(!game.make_move(direction));
        assert!(!game.simulate(direction).valid);
    }
    assert_eq!(game.status(), frozen);
}

#[test]
fn test_simulate_never_mutates_status() {
    let mut game = Game::seeded(4, 12);
    for _ in 0..30 {
        for direction in Direction::ALL {
            let before = game.status();
            let sim = game.simulate(direction);
            assert_eq!(game.status(), before);
            if !sim.valid {
                assert_eq!(sim.board, before.board);
                assert_eq!(sim.score, before.score);
            }
        }
        let legal = game.legal_directions();
        if let Some(&direction) = legal.first() {
            assert!(game.make_move(direction));
        }
    }
}

#[test]
fn test_simulation_pre_spawn_layout_matches_real_move() {
    let mut game = Game::seeded(4, 55);
    for direction in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
        let expected = game.state().board().slide(direction);
        let sim = game.simulate(direction);
        let changed = game.make_move(direction);
        assert_eq!(sim.valid, changed);
        if changed {
            // Real and simulated boards agree everywhere except where each
            // placed its spawned tile.
            let slid = expected.board().rows();
            let real = game.status().board;
            for (board, label) in [(&sim.board, "simulated"), (&real, "real")] {
                let differing = slid
                    .iter()
                    .flatten()
                    .zip(board.iter().flatten())
                    .filter(|(a, b)| a != b)
                    .count();
                assert_eq!(differing, 1, "{label} board should differ by one spawn");
            }
        }
    }
}

#[test]
fn test_snapshot_serializes_documented_keys() {
    let s = state(vec![vec![2, 0], vec![0, 4]], 12);
    let json = serde_json::to_value(s.snapshot()).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({
            "board": [[2, 0], [0, 4]],
            "score": 12,
            "terminal": false,
            "size": 2
        })
    );
}

#[test]
fn test_simulation_serializes_documented_keys() {
    let s = state(vec![vec![2, 4], vec![4, 2]], 0);
    let sim = s.simulate(Direction::Up, &mut StdRng::seed_from_u64(0));
    let json = serde_json::to_value(sim).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({
            "valid": false,
            "board": [[2, 4], [4, 2]],
            "score": 0,
            "terminal": true
        })
    );
}

#[test]
fn test_default_game_is_four_by_four() {
    let game = Game::default();
    let status = game.status();
    assert_eq!(status.size, 4);
    assert_eq!(status.board.len(), 4);
    assert_eq!(
        status.board.iter().flatten().filter(|&&v| v != 0).count(),
        2
    );
}
