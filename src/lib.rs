//! # Quiz Round
//!
//! Core engine for a turn-synchronized, timed multiplayer quiz. Players
//! register in a lobby, the host opens questions one at a time, answers
//! earn points that shrink with every second on the round clock, and a
//! ranked leaderboard is produced at the end.
//!
//! The engine does no I/O and reads no wall clock. A driver calls
//! [`game::Game::tick`] once a second and forwards player and host actions;
//! [`view`] turns the session into host and player screens.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
use derive_where::derive_where;
use itertools::Itertools;
use serde::Serialize;

pub mod clock;
pub mod constants;
pub mod game;
pub mod leaderboard;
pub mod names;
pub mod question;
pub mod roster;
pub mod scoring;
pub mod shared;
pub mod view;

/// A screen update for one participant
///
/// Wraps whichever projection the recipient renders so a driver can push
/// both kinds over the same channel.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum SyncMessage {
    /// The host's screen
    Host(view::HostView),
    /// A player's screen
    Player(view::PlayerView),
}

impl SyncMessage {
    /// Converts the message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which cannot happen for
    /// these types with the default JSON serializer.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A list capped for display that still reports the full count
///
/// Used to show "57 players" while only sending the first 50 names.
#[derive(Debug, Clone, Serialize)]
#[derive_where(Default)]
pub struct TruncatedVec<T> {
    exact_count: usize,
    items: Vec<T>,
}

impl<T> TruncatedVec<T> {
    /// Takes up to `limit` items from `list`, recording `exact_count` as the total
    pub fn new<I: Iterator<Item = T>>(list: I, limit: usize, exact_count: usize) -> Self {
        Self {
            exact_count,
            items: list.take(limit).collect_vec(),
        }
    }

    /// The total number of items before truncation
    pub fn exact_count(&self) -> usize {
        self.exact_count
    }

    /// The items kept
    pub fn items(&self) -> &[T] {
        &self.items
    }
}
