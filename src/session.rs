//! Session hosting: load a session, apply one request, store it back.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::BetError;
use crate::game::{Action, Game};
use crate::options::TableOptions;
use crate::sync::Mutex;
use crate::view::Snapshot;

/// A request against one session.
///
/// Serialized with an `action` tag, e.g. `{"action":"bet","bet":100}` or
/// `{"action":"hit"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    /// Return the current snapshot without changing anything.
    State,
    /// Place a bet and deal a round.
    Bet {
        /// Amount to stake.
        bet: usize,
    },
    /// Hit the active hand.
    Hit,
    /// Stand on the active hand.
    Stand,
    /// Double down on the active hand.
    Double,
    /// Split the pair.
    Split,
    /// Surrender the active hand.
    Surrender,
    /// Take insurance.
    Insurance,
    /// Restore the starting bankroll and a fresh deck.
    Reset,
}

impl Game {
    /// Applies one request and returns the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error only for an invalid bet amount.
    pub fn apply(&mut self, request: Request) -> Result<Snapshot, BetError> {
        let action = match request {
            Request::State => return Ok(self.snapshot()),
            Request::Bet { bet } => {
                self.bet(bet)?;
                return Ok(self.snapshot());
            }
            Request::Reset => {
                self.reset();
                return Ok(self.snapshot());
            }
            Request::Hit => Action::Hit,
            Request::Stand => Action::Stand,
            Request::Double => Action::Double,
            Request::Split => Action::Split,
            Request::Surrender => Action::Surrender,
            Request::Insurance => Action::Insurance,
        };

        Ok(self.perform(action))
    }
}

/// Persistence for session state between requests.
pub trait SessionStore {
    /// Returns the stored state, or `None` for an unknown session.
    fn load(&self, session_id: &str) -> Option<Game>;

    /// Stores the state after a request.
    fn store(&self, session_id: &str, game: Game);

    /// Forgets a session.
    fn remove(&self, session_id: &str);
}

/// A [`SessionStore`] keeping every session in memory.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, Game>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub fn len(&self) -> usize {
        self.games.lock().len()
    }

    /// Returns whether no session is stored.
    pub fn is_empty(&self) -> bool {
        self.games.lock().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, session_id: &str) -> Option<Game> {
        self.games.lock().get(session_id).cloned()
    }

    fn store(&self, session_id: &str, game: Game) {
        self.games.lock().insert(session_id.to_string(), game);
    }

    fn remove(&self, session_id: &str) {
        self.games.lock().remove(session_id);
    }
}

/// Serves requests for many independent sessions.
///
/// Requests for the same session are processed one at a time; requests for
/// different sessions do not wait on each other.
pub struct SessionHost<S> {
    store: S,
    options: TableOptions,
    /// Seed for the next new session.
    next_seed: AtomicU64,
    /// Per-session locks held for the whole load/apply/store cycle.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: SessionStore> SessionHost<S> {
    /// Creates a host. New sessions are seeded from `seed` onwards.
    pub fn new(store: S, options: TableOptions, seed: u64) -> Self {
        Self {
            store,
            options,
            next_seed: AtomicU64::new(seed),
            locks: Mutex::default(),
        }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(session_id) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(session_id.to_string(), Arc::clone(&lock));
        lock
    }

    fn new_game(&self, session_id: &str) -> Game {
        let seed = self.next_seed.fetch_add(1, Ordering::SeqCst);
        tracing::info!(session_id, seed, "session started");
        Game::new(self.options.clone(), seed)
    }

    /// Handles one request for a session, creating the session if needed.
    ///
    /// # Errors
    ///
    /// Returns an error only for an invalid bet amount. The session is stored
    /// either way.
    pub fn handle(&self, session_id: &str, request: Request) -> Result<Snapshot, BetError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let mut game = self
            .store
            .load(session_id)
            .unwrap_or_else(|| self.new_game(session_id));

        let response = game.apply(request);
        if let Err(err) = &response {
            tracing::debug!(session_id, ?request, %err, "request rejected");
        }

        self.store.store(session_id, game);
        response
    }

    /// Drops a session's state.
    ///
    /// The session's lock is kept: requests already waiting on it must still
    /// exclude requests that arrive after the session ends.
    pub fn end_session(&self, session_id: &str) {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();
        self.store.remove(session_id);
        tracing::info!(session_id, "session ended");
    }
}
