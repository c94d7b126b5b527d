//! Game rules for 2048.
//!
//! Pure functions over [`Board`](super::Board): sliding/merging and
//! terminal detection. Rules are kept apart from state storage so the
//! game, the simulator and the invariants share one implementation.

pub mod slide;
pub mod terminal;

pub use slide::{Slide, compress, merge, merged_value, slide_row};
pub use terminal::{has_horizontal_pair, has_vertical_pair, is_terminal};
