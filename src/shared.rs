//! Thread-safe handle to a session
//!
//! Drivers that tick the clock from a timer thread while other threads
//! deliver answers share a [`SharedGame`]. Every call takes the same lock,
//! so a tick, an answer and an advance can never interleave.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    game::{Error, Game, State},
    leaderboard::Leaderboard,
    roster::{AnswerRecord, Id, PlayerRecord},
    view::{HostView, PlayerView},
};

/// A cloneable, lock-guarded [`Game`]
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}

impl SharedGame {
    /// Wraps a session for shared use
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// See [`Game::register`]
    ///
    /// # Errors
    ///
    /// Propagates the session's error.
    pub fn register(&self, display_name: &str) -> Result<Id, Error> {
        self.inner.lock().register(display_name)
    }

    /// See [`Game::start`]
    ///
    /// # Errors
    ///
    /// Propagates the session's error.
    pub fn start(&self) -> Result<(), Error> {
        self.inner.lock().start()
    }

    /// See [`Game::tick`]
    pub fn tick(&self) -> Option<u64> {
        self.inner.lock().tick()
    }

    /// See [`Game::submit_answer`]
    ///
    /// # Errors
    ///
    /// Propagates the session's error.
    pub fn submit_answer(
        &self,
        player: Id,
        question_id: u64,
        chosen_index: usize,
    ) -> Result<AnswerRecord, Error> {
        self.inner
            .lock()
            .submit_answer(player, question_id, chosen_index)
    }

    /// See [`Game::advance`]
    ///
    /// # Errors
    ///
    /// Propagates the session's error.
    pub fn advance(&self) -> Result<State, Error> {
        self.inner.lock().advance()
    }

    /// See [`Game::restart`]
    pub fn restart(&self) {
        self.inner.lock().restart();
    }

    /// The current phase
    pub fn state(&self) -> State {
        self.inner.lock().state()
    }

    /// The round clock reading
    pub fn clock_value(&self) -> u64 {
        self.inner.lock().clock_value()
    }

    /// An owned copy of the ranked players
    pub fn ranked_snapshot(&self) -> Vec<PlayerRecord> {
        self.inner
            .lock()
            .ranked_snapshot()
            .into_iter()
            .cloned()
            .collect()
    }

    /// An owned leaderboard
    pub fn leaderboard(&self) -> Leaderboard {
        self.inner.lock().leaderboard()
    }

    /// The host projection
    pub fn host_view(&self) -> HostView {
        HostView::new(&*self.inner.lock())
    }

    /// A player's projection
    pub fn player_view(&self, id: Id) -> Option<PlayerView> {
        PlayerView::new(&*self.inner.lock(), id)
    }

    /// Runs `f` against the session while holding the lock
    pub fn read<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&*self.inner.lock())
    }
}
