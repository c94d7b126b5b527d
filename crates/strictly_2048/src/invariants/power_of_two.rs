//! Tile values are always powers of two.

use super::super::{GameState, is_valid_cell};
use super::Invariant;

/// Invariant: every non-empty cell holds 2^k for some k >= 1.
///
/// Spawns only place 2s and 4s and merges only double equal tiles, so no
/// other value is reachable.
pub struct PowerOfTwoTilesInvariant;

impl Invariant<GameState> for PowerOfTwoTilesInvariant {
    fn holds(state: &GameState) -> bool {
        state.board().cells().iter().all(|&v| is_valid_cell(v))
    }

    fn description() -> &'static str {
        "Every tile is a power of two of at least 2"
    }
}
