//! Player records and answer bookkeeping
//!
//! Players live in an arena ordered by registration, with a side index from
//! [`Id`] to arena slot. Registration order doubles as the tie-break for the
//! ranked snapshot, so the arena is never reordered.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    constants::roster::MAX_PLAYER_COUNT,
    names::{self, Names},
    question::Question,
    scoring::Scoring,
};

/// A unique identifier for a registered player
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random player ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Id {
    type Err = uuid::Error;

    /// Parses an ID from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// The outcome of one player answering one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    /// The question that was answered
    pub question_id: u64,
    /// The option the player picked
    pub chosen_index: usize,
    /// Whether the pick was the correct option
    pub is_correct: bool,
    /// Points earned, zero when incorrect
    pub points_awarded: u64,
    /// Round clock reading when the answer was accepted
    pub elapsed_seconds: u64,
}

/// Everything the engine knows about one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    id: Id,
    display_name: String,
    total_points: u64,
    current_answer: Option<usize>,
    history: Vec<AnswerRecord>,
}

impl PlayerRecord {
    fn new(id: Id, display_name: String) -> Self {
        Self {
            id,
            display_name,
            total_points: 0,
            current_answer: None,
            history: Vec::new(),
        }
    }

    /// The player's identifier
    pub fn id(&self) -> Id {
        self.id
    }

    /// The trimmed name the player registered with
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Sum of points over the answer history
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// The option picked for the open question, if the player has answered it
    pub fn current_answer(&self) -> Option<usize> {
        self.current_answer
    }

    /// Every answer given since the last restart, oldest first
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// The answer given to `question_id`, if any
    pub fn answer_for(&self, question_id: u64) -> Option<&AnswerRecord> {
        self.history.iter().find(|a| a.question_id == question_id)
    }

    fn reset(&mut self) {
        self.total_points = 0;
        self.current_answer = None;
        self.history.clear();
    }
}

/// Errors raised by the roster
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The display name was rejected
    #[error(transparent)]
    Name(#[from] names::Error),
    /// The session has reached the maximum number of players
    #[error("maximum number of players reached")]
    MaximumPlayers,
    /// No player is registered under the given ID
    #[error("unknown player")]
    UnknownPlayer,
    /// The player has already answered this question
    #[error("question already answered")]
    AlreadyAnswered,
    /// The chosen index does not name an option of the question
    #[error("option does not exist")]
    InvalidOption,
}

/// Mutable per-player state, keyed by [`Id`], in registration order
#[derive(Debug, Default, Clone)]
pub struct Roster {
    players: Vec<PlayerRecord>,
    slots: HashMap<Id, usize>,
    names: Names,
}

impl Roster {
    /// Adds a player under a fresh ID
    ///
    /// # Errors
    ///
    /// * `Error::MaximumPlayers` - the roster is full
    /// * `Error::Name` - the display name was rejected, including
    ///   `names::Error::Used` for a case-sensitive duplicate
    pub fn register(&mut self, display_name: &str) -> Result<Id, Error> {
        if self.players.len() >= MAX_PLAYER_COUNT {
            return Err(Error::MaximumPlayers);
        }
        let display_name = self.names.claim(display_name)?;

        let id = Id::new();
        self.slots.insert(id, self.players.len());
        self.players.push(PlayerRecord::new(id, display_name));
        Ok(id)
    }

    /// Records `chosen_index` as the player's answer to `question`
    ///
    /// On success the record is appended to the player's history, their
    /// current answer is set and their total grows by the awarded points.
    ///
    /// # Errors
    ///
    /// * `Error::UnknownPlayer` - no player has this ID
    /// * `Error::InvalidOption` - `chosen_index` is not one of the options
    /// * `Error::AlreadyAnswered` - the player already answered this question
    pub fn submit_answer(
        &mut self,
        id: Id,
        question: &Question,
        chosen_index: usize,
        elapsed_seconds: u64,
        scoring: &Scoring,
    ) -> Result<AnswerRecord, Error> {
        let player = self
            .slots
            .get(&id)
            .and_then(|slot| self.players.get_mut(*slot))
            .ok_or(Error::UnknownPlayer)?;

        if !question.has_option(chosen_index) {
            return Err(Error::InvalidOption);
        }
        if player.answer_for(question.id).is_some() {
            return Err(Error::AlreadyAnswered);
        }

        let is_correct = question.is_correct(chosen_index);
        let record = AnswerRecord {
            question_id: question.id,
            chosen_index,
            is_correct,
            points_awarded: scoring.award(is_correct, elapsed_seconds),
            elapsed_seconds,
        };

        player.history.push(record);
        player.current_answer = Some(chosen_index);
        player.total_points = player.total_points.saturating_add(record.points_awarded);

        Ok(record)
    }

    /// Unsets every player's current answer, leaving histories untouched
    pub fn clear_current_answers(&mut self) {
        for player in &mut self.players {
            player.current_answer = None;
        }
    }

    /// Wipes every player's answers and totals but keeps the players
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    /// Removes every player and releases their names
    pub fn clear(&mut self) {
        self.players.clear();
        self.slots.clear();
        self.names.clear();
    }

    /// Players by total points, highest first
    ///
    /// Equal totals keep registration order, so the first player to join
    /// wins a tie.
    pub fn ranked_snapshot(&self) -> Vec<&PlayerRecord> {
        self.players
            .iter()
            .sorted_by(|a, b| b.total_points.cmp(&a.total_points))
            .collect_vec()
    }

    /// The record for `id`, if registered
    pub fn get(&self, id: Id) -> Option<&PlayerRecord> {
        self.slots.get(&id).and_then(|slot| self.players.get(*slot))
    }

    /// Players in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    /// Number of players who have answered the open question
    pub fn answered_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.current_answer.is_some())
            .count()
    }

    /// Number of registered players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether nobody has registered
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
