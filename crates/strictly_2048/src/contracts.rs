//! Contract-based validation for 2048 moves.
//!
//! Contracts formalise the Hoare-style reasoning `{P} move {Q}`. The
//! precondition decides whether a move may run at all; the postcondition
//! relates the committed state to the state before the move.

use super::invariants::{Game2048Invariants, InvariantSet};
use super::{Direction, GameState};
use derive_more::Display;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Reason a move contract was not met.
///
/// A failed precondition is an ordinary outcome (the move is a no-op);
/// a failed postcondition is a bug in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The score went down.
    #[display("Score decreased from {} to {}", _0, _1)]
    ScoreDecreased(u64, u64),

    /// Merging must conserve the tile sum; only the spawned tile adds to it.
    #[display("Tile sum grew by {}, expected 2 or 4", _0)]
    TileSumDrift(i128),

    /// The board changed size.
    #[display("Board size changed from {} to {}", _0, _1)]
    SizeChanged(usize, usize),

    /// A terminal state became active again.
    #[display("Terminal state was revived")]
    TerminalRevived,

    /// A state invariant was violated.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

// ─────────────────────────────────────────────────────────────
//  Move Contract
// ─────────────────────────────────────────────────────────────

/// Contract for a committed (board-changing) move.
///
/// Precondition:
/// - The game is not over
///
/// Postconditions:
/// - Score never decreases
/// - Tile sum grows by exactly the spawned tile
/// - Size is preserved and a terminal game stays terminal
/// - All state invariants hold
pub struct MoveContract;

impl Contract<GameState, Direction> for MoveContract {
    fn pre(state: &GameState, _direction: &Direction) -> Result<(), MoveError> {
        if state.is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if after.score() < before.score() {
            return Err(MoveError::ScoreDecreased(before.score(), after.score()));
        }
        if after.size() != before.size() {
            return Err(MoveError::SizeChanged(before.size(), after.size()));
        }
        if before.is_terminal() && !after.is_terminal() {
            return Err(MoveError::TerminalRevived);
        }

        let growth = tile_sum(after) - tile_sum(before);
        if growth != 2 && growth != 4 {
            return Err(MoveError::TileSumDrift(growth));
        }

        Game2048Invariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

fn tile_sum(state: &GameState) -> i128 {
    state.board().cells().iter().map(|&v| i128::from(v)).sum()
}

/// Asserts the move contract between two states (panics on violation in
/// debug builds).
#[instrument(skip_all)]
pub fn assert_move_contract(before: &GameState, after: &GameState) {
    if let Err(e) = MoveContract::post(before, after) {
        warn!(error = %e, "Move postcondition violated");
        debug_assert!(false, "Move postcondition violated: {}", e);
    }
}
