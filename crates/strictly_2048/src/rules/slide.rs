//! Sliding and merging.
//!
//! Every direction is solved by rotating the board so the move becomes a
//! left slide, sliding each row left, and rotating back.

use super::super::{Board, Direction};
use derive_getters::Getters;
use tracing::{instrument, trace};

/// Left-packs the non-zero values of `row`, padding the right with zeros.
pub fn compress(row: &[u64]) -> Vec<u64> {
    let mut packed: Vec<u64> = row.iter().copied().filter(|&v| v != 0).collect();
    packed.resize(row.len(), 0);
    packed
}

/// Returns the merged tile if `left` and `right` can combine.
///
/// Equal non-zero tiles merge unless doubling would overflow `u64`, in
/// which case the pair stays put.
pub fn merged_value(left: u64, right: u64) -> Option<u64> {
    if left != 0 && left == right {
        left.checked_mul(2)
    } else {
        None
    }
}

/// Merges equal neighbours in a compressed row, scanning left to right.
///
/// The doubled value lands in the left cell and the right cell is cleared,
/// so a freshly merged cell can never merge again in the same pass.
/// Returns the sum of the merged values, saturating at `u64::MAX`.
pub fn merge(row: &mut [u64]) -> u64 {
    let mut gained: u64 = 0;
    for i in 1..row.len() {
        if let Some(value) = merged_value(row[i - 1], row[i]) {
            row[i - 1] = value;
            row[i] = 0;
            gained = gained.saturating_add(value);
        }
    }
    gained
}

/// Slides one row to the left: compress, merge, compress again.
///
/// Returns the new row and the score gained from its merges.
pub fn slide_row(row: &[u64]) -> (Vec<u64>, u64) {
    let mut packed = compress(row);
    let gained = merge(&mut packed);
    (compress(&packed), gained)
}

/// Outcome of sliding a board, before any tile is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Slide {
    /// Board after sliding and merging.
    board: Board,
    /// Sum of all tiles produced by merges.
    gained: u64,
    /// Whether any cell differs from the board before the slide.
    changed: bool,
}

impl Slide {
    /// Consumes the slide, returning its parts.
    pub fn into_parts(self) -> (Board, u64, bool) {
        (self.board, self.gained, self.changed)
    }
}

impl Board {
    /// Slides every tile in `direction`, merging equal neighbours.
    ///
    /// Pure and randomness-free: no tile is spawned.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn slide(&self, direction: Direction) -> Slide {
        let (board, gained) = match direction {
            Direction::Left => self.slide_left(),
            Direction::Right => {
                let (slid, gained) = self.rotate_half().slide_left();
                (slid.rotate_half(), gained)
            }
            Direction::Up => {
                let (slid, gained) = self.rotate_counter_clockwise().slide_left();
                (slid.rotate_clockwise(), gained)
            }
            Direction::Down => {
                let (slid, gained) = self.rotate_clockwise().slide_left();
                (slid.rotate_counter_clockwise(), gained)
            }
        };
        let changed = board != *self;
        trace!(?direction, gained, changed, "Slid board");
        Slide {
            board,
            gained,
            changed,
        }
    }

    fn slide_left(&self) -> (Board, u64) {
        let n = self.size();
        let mut slid = Board::new(n);
        let mut gained: u64 = 0;
        for r in 0..n {
            let (row, row_gain) = slide_row(self.row(r));
            for (c, value) in row.into_iter().enumerate() {
                slid.set(r, c, value);
            }
            gained = gained.saturating_add(row_gain);
        }
        (slid, gained)
    }
}
