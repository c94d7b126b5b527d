//! Parsing of interactive session commands.
//!
//! This is where caller input is validated: anything that is not a known
//! command or direction is rejected here, so the engine only ever sees a
//! [`Direction`].

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_2048::Direction;
use tracing::instrument;

/// One line of input in an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Slide the tiles.
    Move(Direction),
    /// Preview a move without committing it.
    Simulate(Direction),
    /// Print the current board.
    Status,
    /// List the directions that would change the board.
    Legal,
    /// Start a fresh game.
    Reset,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
Commands:
  up | down | left | right   move (aliases: u d l r, w a s)
  simulate <direction>       preview a move (alias: try)
  status                     show the board
  legal                      list moves that change the board
  reset                      start a new game
  help                       show this text
  quit                       leave (alias: exit)";

impl FromStr for SessionCommand {
    type Err = CommandError;

    #[instrument(name = "parse_command")]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::new("Empty command"));
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(CommandError::new(format!("Too many arguments in {:?}", line.trim())));
        }

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("simulate" | "try", Some(direction)) => SessionCommand::Simulate(parse_direction(direction)?),
            ("simulate" | "try", None) => {
                return Err(CommandError::new("simulate needs a direction"));
            }
            ("status" | "show", None) => SessionCommand::Status,
            ("legal" | "moves", None) => SessionCommand::Legal,
            ("reset" | "new", None) => SessionCommand::Reset,
            ("help" | "?", None) => SessionCommand::Help,
            ("quit" | "exit" | "q", None) => SessionCommand::Quit,
            (_, None) => SessionCommand::Move(parse_direction(head)?),
            (other, Some(_)) => {
                return Err(CommandError::new(format!("{:?} takes no argument", other)));
            }
        };
        Ok(command)
    }
}

fn parse_direction(word: &str) -> Result<Direction, CommandError> {
    word.parse::<Direction>()
        .map_err(|e| CommandError::new(e.to_string()))
}

/// Rejected session input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{} (at {}:{})", message, file, line)]
pub struct CommandError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CommandError {
    /// Creates a new command error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
