//! Core domain types for 2048.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the standard board.
pub const DEFAULT_SIZE: usize = 4;

/// Square N×N grid of tiles.
///
/// A cell is either `0` (empty) or a tile whose value is a power of two
/// no smaller than 2.
///
/// Serialises as nested rows; deserialising goes through
/// [`Board::from_rows`], so malformed input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")]
pub struct Board {
    /// Side length.
    size: usize,
    /// Cells in row-major order (`size * size` entries).
    cells: Vec<u64>,
}

impl Board {
    /// Creates an empty board of the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Builds a board from rows.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the rows do not form a square or a
    /// non-zero cell is not a power of two of at least 2.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::NotSquare {
                    row: r,
                    len: row.len(),
                    size,
                });
            }
            cells.extend(row);
        }
        if let Some(pos) = cells.iter().position(|&v| !is_valid_cell(v)) {
            return Err(BoardError::InvalidTile {
                row: pos / size,
                col: pos % size,
                value: cells[pos],
            });
        }
        Ok(Self { size, cells })
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at (`row`, `col`), or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u64> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u64) {
        self.cells[row * self.size + col] = value;
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> &[u64] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Returns the grid as nested rows.
    pub fn rows(&self) -> Vec<Vec<u64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[u64]>::to_vec).collect()
    }

    /// Returns the coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Returns true if at least one cell is empty.
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|v| **v != 0).count()
    }

    /// Largest tile on the board (`0` if the board is empty).
    pub fn max_tile(&self) -> u64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Returns the board rotated 90° clockwise.
    pub fn rotate_clockwise(&self) -> Self {
        let n = self.size;
        let mut rotated = Self::new(n);
        for r in 0..n {
            for c in 0..n {
                rotated.set(c, n - 1 - r, self.cells[r * n + c]);
            }
        }
        rotated
    }

    /// Returns the board rotated 90° counter-clockwise.
    pub fn rotate_counter_clockwise(&self) -> Self {
        let n = self.size;
        let mut rotated = Self::new(n);
        for r in 0..n {
            for c in 0..n {
                rotated.set(n - 1 - c, r, self.cells[r * n + c]);
            }
        }
        rotated
    }

    /// Returns the board rotated 180°.
    pub fn rotate_half(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.reverse();
        Self {
            size: self.size,
            cells,
        }
    }
}

impl TryFrom<Vec<Vec<u64>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u64>> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_tile().to_string().len().max(1);
        for r in 0..self.size {
            let line = self
                .row(r)
                .iter()
                .map(|&v| match v {
                    0 => format!("{:>width$}", "."),
                    v => format!("{:>width$}", v),
                })
                .collect::<Vec<_>>()
                .join(" ");
            if r + 1 < self.size {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Returns true for `0` and for powers of two no smaller than 2.
pub fn is_valid_cell(value: u64) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Error building a [`Board`] from caller-supplied rows.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A row length differs from the number of rows.
    #[display("Row {} has {} cells, expected {}", row, len, size)]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Its length.
        len: usize,
        /// Expected length.
        size: usize,
    },

    /// A cell holds a value that is not a valid tile.
    #[display("Cell ({}, {}) holds {}, which is not a power of two >= 2", row, col, value)]
    InvalidTile {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Rejected value.
        value: u64,
    },
}
