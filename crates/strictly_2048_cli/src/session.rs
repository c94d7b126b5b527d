//! Shared, mutex-guarded game handle.
//!
//! The engine never locks. Front-ends that hand one game to several
//! callers go through [`SharedGame`], which serialises every call on a
//! single mutex and tells subscribers whenever the board changes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_2048::{Direction, Game, Simulation, Snapshot};
use tracing::{debug, info, instrument};

/// Callback invoked with the new snapshot after a change.
pub type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

struct Session {
    game: Game,
    size: usize,
    seed: Option<u64>,
    generation: u64,
}

impl Session {
    fn start(size: usize, seed: Option<u64>, generation: u64) -> Game {
        match seed {
            Some(seed) => Game::seeded(size, seed.wrapping_add(generation)),
            None => Game::new(size),
        }
    }
}

/// Cloneable handle to one game shared between callers.
#[derive(Clone)]
pub struct SharedGame {
    session: Arc<Mutex<Session>>,
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl std::fmt::Debug for SharedGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.lock();
        f.debug_struct("SharedGame")
            .field("size", &session.size)
            .field("seed", &session.seed)
            .field("generation", &session.generation)
            .field("score", &session.game.state().score())
            .finish()
    }
}

impl SharedGame {
    /// Creates a handle around a fresh game.
    ///
    /// With a seed, the first game uses it directly and every reset
    /// advances it by one, so a whole session replays identically.
    #[instrument]
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        info!("Creating shared game");
        Self {
            session: Arc::new(Mutex::new(Session {
                game: Session::start(size, seed, 0),
                size,
                seed,
                generation: 0,
            })),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // A panic while holding the lock cannot leave a half-applied move: the
    // engine commits by assignment after computing the new board.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a callback fired after every changing move and reset.
    ///
    /// Listeners live as long as the handle. A listener that captures a
    /// clone of this handle keeps the game alive forever; capture what it
    /// needs from the snapshot argument instead.
    pub fn subscribe(&self, listener: impl Fn(&Snapshot) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
        debug!("Listener registered");
    }

    fn notify(&self, snapshot: &Snapshot) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!(count = listeners.len(), "Notifying listeners");
        for listener in listeners {
            listener(snapshot);
        }
    }

    /// Returns the current snapshot.
    pub fn status(&self) -> Snapshot {
        self.lock().game.status()
    }

    /// Applies a move; returns whether the board changed.
    #[instrument(skip(self))]
    pub fn make_move(&self, direction: Direction) -> bool {
        let (changed, snapshot) = {
            let mut session = self.lock();
            let changed = session.game.make_move(direction);
            (changed, session.game.status())
        };
        if changed {
            self.notify(&snapshot);
        }
        changed
    }

    /// Previews a move on a copy of the current state.
    #[instrument(skip(self))]
    pub fn simulate(&self, direction: Direction) -> Simulation {
        self.lock().game.simulate(direction)
    }

    /// Directions that would change the board.
    pub fn legal_directions(&self) -> Vec<Direction> {
        self.lock().game.legal_directions()
    }

    /// Replaces the game with a fresh one of the same size.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Snapshot {
        let snapshot = {
            let mut session = self.lock();
            session.generation += 1;
            session.game = Session::start(session.size, session.seed, session.generation);
            info!(generation = session.generation, "Game reset");
            session.game.status()
        };
        self.notify(&snapshot);
        snapshot
    }

    /// Number of resets since the handle was created.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}
