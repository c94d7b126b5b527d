//! Terminal flag agrees with the board.

use super::super::{GameState, rules};
use super::Invariant;

/// Invariant: the terminal flag is set exactly when the board is dead.
///
/// The flag is evaluated at creation and after every spawn, and a dead
/// board can never be changed by a move, so the two never drift apart.
pub struct TerminalFlagInvariant;

impl Invariant<GameState> for TerminalFlagInvariant {
    fn holds(state: &GameState) -> bool {
        state.is_terminal() == rules::is_terminal(state.board())
    }

    fn description() -> &'static str {
        "Terminal flag matches the board"
    }
}
