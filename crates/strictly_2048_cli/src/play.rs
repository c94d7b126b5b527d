//! Line-oriented play loop and autoplay.

use crate::command::{HELP, SessionCommand};
use crate::session::SharedGame;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::io::{BufRead, Write};
use strictly_2048::{Board, Direction, Game, Simulation, Snapshot};
use tracing::{debug, info, instrument, warn};

/// How results are written to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable grid.
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Picks JSON when `json` is set.
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Renders a snapshot as a text grid followed by the score line.
pub fn render(snapshot: &Snapshot) -> Result<String> {
    let board = Board::from_rows(snapshot.board.clone()).context("Snapshot holds an invalid board")?;
    let mut text = format!("{}\nScore: {}", board, snapshot.score);
    if snapshot.terminal {
        text.push_str("  (game over)");
    }
    Ok(text)
}

fn render_simulation(simulation: &Simulation, direction: Direction) -> Result<String> {
    let board = Board::from_rows(simulation.board.clone()).context("Simulation holds an invalid board")?;
    let verdict = if simulation.valid { "would change the board" } else { "would not change the board" };
    Ok(format!(
        "{} {}\n{}\nScore: {}",
        direction, verdict, board, simulation.score
    ))
}

fn write_snapshot<W: Write>(out: &mut W, format: OutputFormat, snapshot: &Snapshot) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", render(snapshot)?)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(snapshot)?)?,
    }
    Ok(())
}

/// Totals reported when a session or autoplay run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Moves that changed the board.
    pub moves: usize,
    /// Final score.
    pub score: u64,
    /// Largest tile on the final board.
    pub max_tile: u64,
    /// Whether the final game is over.
    pub terminal: bool,
}

impl Summary {
    fn from_snapshot(moves: usize, snapshot: &Snapshot) -> Self {
        Self {
            moves,
            score: snapshot.score,
            max_tile: snapshot.board.iter().flatten().copied().max().unwrap_or(0),
            terminal: snapshot.terminal,
        }
    }
}

/// Runs an interactive session, reading one command per line.
///
/// Invalid input is reported and skipped; the session ends on `quit` or
/// end of input.
#[instrument(skip_all, fields(format = ?format))]
pub fn run_session<R: BufRead, W: Write>(
    game: &SharedGame,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<Summary> {
    info!("Starting interactive session");
    write_snapshot(out, format, &game.status())?;

    let mut moves = 0;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!(input = %line, error = %e, "Rejected input");
                match format {
                    OutputFormat::Text => writeln!(out, "error: {}", e.message)?,
                    OutputFormat::Json => writeln!(out, "{}", json!({ "error": e.message }))?,
                }
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::Move(direction) => {
                let changed = game.make_move(direction);
                if changed {
                    moves += 1;
                }
                let snapshot = game.status();
                match format {
                    OutputFormat::Text => {
                        if !changed {
                            let reason = if snapshot.terminal { "game is over" } else { "nothing moved" };
                            writeln!(out, "{}: {}", direction, reason)?;
                        }
                        writeln!(out, "{}", render(&snapshot)?)?;
                    }
                    OutputFormat::Json => writeln!(
                        out,
                        "{}",
                        json!({ "direction": direction, "changed": changed, "status": snapshot })
                    )?,
                }
            }
            SessionCommand::Simulate(direction) => {
                let simulation = game.simulate(direction);
                match format {
                    OutputFormat::Text => writeln!(out, "{}", render_simulation(&simulation, direction)?)?,
                    OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&simulation)?)?,
                }
            }
            SessionCommand::Status => write_snapshot(out, format, &game.status())?,
            SessionCommand::Legal => {
                let legal = game.legal_directions();
                match format {
                    OutputFormat::Text => {
                        let names: Vec<String> = legal.iter().map(Direction::to_string).collect();
                        writeln!(out, "legal: {}", names.join(" "))?;
                    }
                    OutputFormat::Json => writeln!(out, "{}", json!({ "legal": legal }))?,
                }
            }
            SessionCommand::Reset => {
                moves = 0;
                write_snapshot(out, format, &game.reset())?;
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    let summary = Summary::from_snapshot(moves, &game.status());
    info!(moves = summary.moves, score = summary.score, "Session ended");
    Ok(summary)
}

/// Plays uniformly random legal moves until the game ends or `max_moves`
/// moves have been made.
///
/// With a seed, both the tile spawns and the move choices are
/// reproducible.
#[instrument(skip(game))]
pub fn autoplay(game: &mut Game, seed: Option<u64>, max_moves: usize) -> Summary {
    let mut chooser = match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x2048),
        None => StdRng::from_entropy(),
    };

    let mut moves = 0;
    while moves < max_moves {
        let legal = game.legal_directions();
        let Some(&direction) = legal.choose(&mut chooser) else {
            break;
        };
        if game.make_move(direction) {
            moves += 1;
        }
    }

    let summary = Summary::from_snapshot(moves, &game.status());
    info!(
        moves = summary.moves,
        score = summary.score,
        max_tile = summary.max_tile,
        "Autoplay finished"
    );
    summary
}

/// Writes an autoplay result.
pub fn write_summary<W: Write>(out: &mut W, format: OutputFormat, summary: &Summary, snapshot: &Snapshot) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", render(snapshot)?)?;
            writeln!(out, "Moves: {}  Max tile: {}", summary.moves, summary.max_tile)?;
        }
        OutputFormat::Json => writeln!(out, "{}", json!({ "summary": summary, "status": snapshot }))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_game_over() {
        let snapshot = Snapshot {
            board: vec![vec![2, 4], vec![4, 2]],
            score: 16,
            terminal: true,
            size: 2,
        };
        assert_eq!(render(&snapshot).unwrap(), "2 4\n4 2\nScore: 16  (game over)");
    }

    #[test]
    fn test_render_rejects_corrupt_snapshot() {
        let snapshot = Snapshot {
            board: vec![vec![3]],
            score: 0,
            terminal: false,
            size: 1,
        };
        assert!(render(&snapshot).is_err());
    }

    #[test]
    fn test_autoplay_respects_move_cap() {
        let mut game = Game::seeded(4, 1);
        let summary = autoplay(&mut game, Some(1), 5);
        assert_eq!(summary.moves, 5);
        assert!(!summary.terminal);
    }

    #[test]
    fn test_autoplay_runs_to_completion() {
        let mut game = Game::seeded(3, 17);
        let summary = autoplay(&mut game, Some(17), usize::MAX);
        assert!(summary.terminal);
        assert!(game.legal_directions().is_empty());
        assert!(summary.max_tile >= 4);
    }

    #[test]
    fn test_autoplay_is_reproducible() {
        let a = autoplay(&mut Game::seeded(4, 8), Some(8), 200);
        let b = autoplay(&mut Game::seeded(4, 8), Some(8), 200);
        assert_eq!(a, b);
    }
}
