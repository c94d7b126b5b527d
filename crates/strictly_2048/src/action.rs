//! First-class move directions for 2048.
//!
//! A direction is a closed four-valued type. Text from callers is parsed
//! into a [`Direction`] before it ever reaches the engine, so the engine
//! itself has no invalid-direction path.

use derive_more::{Display, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A direction in which every tile slides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Tiles slide toward row 0.
    Up,
    /// Tiles slide toward the last row.
    Down,
    /// Tiles slide toward column 0.
    Left,
    /// Tiles slide toward the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parses a direction name or one-letter alias (case-insensitive).
    ///
    /// Accepts `up`/`u`/`w`, `down`/`d`/`s`, `left`/`l`/`a`,
    /// `right`/`r`. Note that `d` means down, so the WASD "right" key
    /// is not an alias.
    #[instrument]
    pub fn from_label(s: &str) -> Option<Direction> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" => Some(Direction::Up),
            "down" | "d" | "s" => Some(Direction::Down),
            "left" | "l" | "a" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| DirectionError::new(s))
    }
}

/// A string that does not name any of the four directions.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid direction {:?} (expected up, down, left or right)", input)]
pub struct DirectionError {
    /// The rejected input.
    pub input: String,
}

impl DirectionError {
    /// Creates a new direction error for the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
