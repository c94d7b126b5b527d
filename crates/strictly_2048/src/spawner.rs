//! Random tile placement.

use super::Board;
use rand::Rng;
use tracing::{instrument, trace};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Draws a new tile value: 2 with probability 0.9, otherwise 4.
pub fn random_tile<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    if rng.gen_bool(TWO_PROBABILITY) { 2 } else { 4 }
}

/// Places a random tile on a uniformly chosen empty cell.
///
/// Returns `false` and leaves the board untouched when it is full.
#[instrument(skip(board, rng), fields(size = board.size()))]
pub fn spawn<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> bool {
    let empty = board.empty_cells();
    if empty.is_empty() {
        trace!("No empty cell to spawn into");
        return false;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = random_tile(rng);
    board.set(row, col, value);
    trace!(row, col, value, "Spawned tile");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_fills_one_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(4);
        assert!(spawn(&mut board, &mut rng));
        assert_eq!(board.tile_count(), 1);
        let value = board.max_tile();
        assert!(value == 2 || value == 4);
    }

    #[test]
    fn test_spawn_only_targets_empty_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::from_rows(vec![vec![8, 8], vec![8, 0]]).unwrap();
        assert!(spawn(&mut board, &mut rng));
        assert_eq!(board.row(0), &[8, 8]);
        assert_eq!(board.get(1, 0), Some(8));
        assert_ne!(board.get(1, 1), Some(0));
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
        let before = board.clone();
        assert!(!spawn(&mut board, &mut rng));
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let mut a = Board::new(4);
        let mut b = Board::new(4);
        spawn(&mut a, &mut StdRng::seed_from_u64(42));
        spawn(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tile_distribution_is_mostly_twos() {
        let mut rng = StdRng::seed_from_u64(2048);
        let draws = 10_000;
        let twos = (0..draws).filter(|_| random_tile(&mut rng) == 2).count();
        let ratio = twos as f64 / draws as f64;
        assert!((0.87..0.93).contains(&ratio), "ratio was {ratio}");
    }
}
