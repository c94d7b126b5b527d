//! Game state and engine for 2048.
//!
//! [`GameState`] is a plain value: board, score and terminal flag. It is
//! advanced with an explicit random source so every transition can be
//! replayed from a seed. [`Game`] bundles a state with its own generator
//! and exposes the four operations embedding layers use: create, move,
//! status and simulate.
//!
//! Nothing here locks. Callers sharing a game across threads serialise
//! mutating calls themselves.

use super::contracts::{Contract, MoveContract};
use super::rules;
use super::spawner;
use super::{Board, DEFAULT_SIZE, Direction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Number of tiles placed on a fresh board.
pub const STARTING_TILES: usize = 2;

/// Complete game state.
///
/// Deserialising recomputes the terminal flag from the board, so a stored
/// flag can never disagree with the tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredState")]
pub struct GameState {
    /// The board.
    pub(crate) board: Board,
    /// Sum of every tile produced by a merge so far.
    pub(crate) score: u64,
    /// Set once no move can change the board; never cleared.
    pub(crate) terminal: bool,
}

impl GameState {
    /// Creates a fresh state with two random tiles.
    ///
    /// Terminality is evaluated immediately, so degenerate boards
    /// (size 0 or 1) start out terminal.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut board = Board::new(size);
        for _ in 0..STARTING_TILES {
            spawner::spawn(&mut board, rng);
        }
        let state = Self::from_board(board, 0);
        debug!(terminal = state.terminal, "Created game state");
        state
    }

    /// Wraps an existing board and score, computing the terminal flag.
    pub fn from_board(board: Board, score: u64) -> Self {
        let terminal = rules::is_terminal(&board);
        Self {
            board,
            score,
            terminal,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns the board side length.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Returns true once no move can change the board.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Applies a move: slide, then spawn and re-check terminality if
    /// anything changed.
    ///
    /// Returns whether the board changed. A move that changes nothing, or
    /// any move on a terminal state, leaves the state untouched and draws
    /// nothing from `rng`.
    #[instrument(skip(self, rng), fields(score = self.score))]
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        if let Err(e) = MoveContract::pre(self, &direction) {
            debug!(error = %e, "Move rejected");
            return false;
        }

        let (board, gained, changed) = self.board.slide(direction).into_parts();
        if !changed {
            debug!("Move left board unchanged");
            return false;
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board = board;
        self.score = self.score.saturating_add(gained);
        if spawner::spawn(&mut self.board, rng) && rules::is_terminal(&self.board) {
            self.terminal = true;
            info!(score = self.score, max_tile = self.board.max_tile(), "Game over");
        }
        debug!(gained, score = self.score, "Move applied");

        #[cfg(debug_assertions)]
        super::contracts::assert_move_contract(&before, self);

        true
    }

    /// Answers what `direction` would do, without touching `self`.
    ///
    /// Works on a deep copy and draws its spawn from `rng`, so only the
    /// pre-spawn layout is guaranteed to match a later real move.
    #[instrument(skip(self, rng))]
    pub fn simulate<R: Rng + ?Sized>(&self, direction: Direction, rng: &mut R) -> Simulation {
        let mut scratch = self.clone();
        let valid = scratch.apply_move(direction, rng);
        Simulation {
            valid,
            board: scratch.board.rows(),
            score: scratch.score,
            terminal: scratch.terminal,
        }
    }

    /// Directions that would change the board (none once terminal).
    pub fn legal_directions(&self) -> Vec<Direction> {
        if self.terminal {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&d| *self.board.slide(d).changed())
            .collect()
    }

    /// Returns a read-only, serialisable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.rows(),
            score: self.score,
            terminal: self.terminal,
            size: self.board.size(),
        }
    }
}

#[derive(Deserialize)]
struct StoredState {
    board: Board,
    score: u64,
}

impl From<StoredState> for GameState {
    fn from(stored: StoredState) -> Self {
        Self::from_board(stored.board, stored.score)
    }
}

/// Read-only view of a game, safe to serialise directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    /// Grid of cell values, row by row; `0` marks an empty cell.
    pub board: Vec<Vec<u64>>,
    /// Current score.
    pub score: u64,
    /// Whether the game is over.
    pub terminal: bool,
    /// Side length of the board.
    pub size: usize,
}

/// Result of a simulated move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Simulation {
    /// Whether the move would change the board.
    pub valid: bool,
    /// Board after the simulated move and spawn.
    pub board: Vec<Vec<u64>>,
    /// Score after the simulated move.
    pub score: u64,
    /// Whether the simulated game would be over.
    pub terminal: bool,
}

/// 2048 game engine: a [`GameState`] plus the generator that drives its
/// spawns.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    state: GameState,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a new game seeded from OS entropy.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Creates a reproducible game from a seed.
    #[instrument]
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game driven by the given generator.
    #[instrument(skip(rng))]
    pub fn with_rng(size: usize, mut rng: R) -> Self {
        let state = GameState::new(size, &mut rng);
        info!(size, terminal = state.is_terminal(), "New game");
        Self { state, rng }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Moves every tile in `direction`; returns whether the board changed.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, direction: Direction) -> bool {
        self.state.apply_move(direction, &mut self.rng)
    }

    /// Returns a snapshot of the board, score and terminal flag.
    pub fn status(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Simulates a move using a thread-local generator for the spawn.
    #[instrument(skip(self))]
    pub fn simulate(&self, direction: Direction) -> Simulation {
        self.state.simulate(direction, &mut rand::thread_rng())
    }

    /// Simulates a move drawing the spawn from `rng`.
    pub fn simulate_with<S: Rng + ?Sized>(&self, direction: Direction, rng: &mut S) -> Simulation {
        self.state.simulate(direction, rng)
    }

    /// Directions that would change the board.
    pub fn legal_directions(&self) -> Vec<Direction> {
        self.state.legal_directions()
    }
}
