//! Terminal-state detection for 2048.

use super::super::Board;
use super::slide::merged_value;
use tracing::instrument;

/// Checks whether no move can ever change the board again.
///
/// True iff the board has no empty cell and no two orthogonally adjacent
/// cells can merge.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_terminal(board: &Board) -> bool {
    !board.has_empty() && !has_horizontal_pair(board) && !has_vertical_pair(board)
}

/// Checks for two mergeable tiles side by side in some row.
pub fn has_horizontal_pair(board: &Board) -> bool {
    (0..board.size()).any(|r| {
        board
            .row(r)
            .windows(2)
            .any(|pair| merged_value(pair[0], pair[1]).is_some())
    })
}

/// Checks for two mergeable tiles stacked in some column.
pub fn has_vertical_pair(board: &Board) -> bool {
    let n = board.size();
    (0..n).any(|c| {
        (1..n).any(|r| match (board.get(r - 1, c), board.get(r, c)) {
            (Some(above), Some(below)) => merged_value(above, below).is_some(),
            _ => false,
        })
    })
}
