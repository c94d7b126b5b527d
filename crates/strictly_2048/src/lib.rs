//! Strictly 2048 - pure sliding-tile merge puzzle engine
//!
//! The engine is an in-memory state machine over a square board. Every
//! direction is reduced to a single left slide by rotating the board;
//! a board-changing move spawns one random tile and re-evaluates whether
//! the game is over.
//!
//! # Architecture
//!
//! - **Types**: [`Board`] and [`Direction`]
//! - **Rules**: sliding/merging and terminal detection ([`rules`])
//! - **Spawner**: random 2/4 placement ([`spawner`])
//! - **Game**: [`GameState`], [`Game`], [`Snapshot`], [`Simulation`]
//! - **Contracts**: debug-build postconditions and [`invariants`]
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, Game};
//!
//! let mut game = Game::seeded(4, 42);
//! let preview = game.simulate(Direction::Left);
//! let changed = game.make_move(Direction::Left);
//! assert_eq!(preview.valid, changed);
//! println!("{}", serde_json::to_string(&game.status()).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod game;
pub mod invariants;
pub mod rules;
pub mod spawner;
mod types;

pub use action::{Direction, DirectionError};
pub use contracts::{Contract, MoveContract, MoveError};
pub use game::{Game, GameState, STARTING_TILES, Simulation, Snapshot};
pub use rules::Slide;
pub use types::{Board, BoardError, DEFAULT_SIZE, is_valid_cell};
