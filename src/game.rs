//! Quiz session state machine
//!
//! A [`Game`] owns the roster and the round clock for one session and moves
//! through `Lobby -> InQuestion(0) -> ... -> InQuestion(n - 1) -> Results`.
//! Every mutation goes through a method on [`Game`]; a rejected call returns
//! an [`Error`] and leaves the session exactly as it was.

use std::{fmt::Debug, sync::Arc};

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    clock::RoundClock,
    constants::clock::{DEFAULT_TIME_LIMIT, MAX_TIME_LIMIT, MIN_TIME_LIMIT},
    leaderboard::{Leaderboard, ScoreMessage},
    question::{self, Question, QuestionBank},
    roster::{self, AnswerRecord, Id, PlayerRecord, Roster},
    scoring::Scoring,
};

/// The phase a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Players are registering; no question is open
    Lobby,
    /// The question at this bank index is open for answers
    InQuestion(usize),
    /// Every question has been played
    Results,
}

/// Session configuration
///
/// These options control how answers are scored, how long the countdown
/// shown to players is, and whether players survive a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Point award policy
    #[garde(dive)]
    pub scoring: Scoring,
    /// Countdown displayed per question, in seconds; questions never close on their own
    #[garde(range(min = MIN_TIME_LIMIT, max = MAX_TIME_LIMIT))]
    pub time_limit: u64,
    /// Keep registered players when the session restarts
    #[garde(skip)]
    pub keep_roster: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scoring: Scoring::default(),
            time_limit: DEFAULT_TIME_LIMIT,
            keep_roster: false,
        }
    }
}

/// Errors returned by session operations
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The question bank could not be built
    #[error(transparent)]
    Questions(#[from] question::Error),
    /// The roster rejected the operation
    #[error(transparent)]
    Roster(#[from] roster::Error),
    /// The options failed validation
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The operation is only allowed in the lobby
    #[error("session is not in the lobby")]
    NotInLobby,
    /// The operation needs an open question
    #[error("no question is open")]
    NotInQuestion,
    /// The answer targets a question that is not open
    #[error("question is closed")]
    QuestionClosed,
    /// The session cannot start without players
    #[error("no players have registered")]
    EmptyRoster,
}

/// One quiz session
pub struct Game {
    questions: Arc<QuestionBank>,
    options: Options,
    roster: Roster,
    clock: RoundClock,
    state: State,
}

impl Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("players", &self.roster.len())
            .field("questions", &self.questions.len())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a session in the lobby from a list of questions
    ///
    /// # Errors
    ///
    /// * `Error::Questions` - the list is empty or a question is invalid
    /// * `Error::InvalidOptions` - the options failed validation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quiz_round::game::{Game, Options, State};
    /// use quiz_round::question::Question;
    ///
    /// let questions = vec![Question::new(1, "2 + 2?", ["3", "4"], 1)];
    /// let game = Game::new(questions, Options::default()).unwrap();
    /// assert_eq!(game.state(), State::Lobby);
    /// ```
    pub fn new(questions: Vec<Question>, options: Options) -> Result<Self, Error> {
        Self::with_bank(Arc::new(QuestionBank::new(questions)?), options)
    }

    /// Creates a session in the lobby over a bank shared with other sessions
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOptions` if the options fail validation.
    pub fn with_bank(questions: Arc<QuestionBank>, options: Options) -> Result<Self, Error> {
        options
            .validate()
            .map_err(|report| Error::InvalidOptions(report.to_string()))?;

        Ok(Self {
            questions,
            options,
            roster: Roster::default(),
            clock: RoundClock::default(),
            state: State::Lobby,
        })
    }

    /// Adds a player to the lobby
    ///
    /// # Errors
    ///
    /// * `Error::NotInLobby` - the session has already started
    /// * `Error::Roster` - the name was rejected or the roster is full
    pub fn register(&mut self, display_name: &str) -> Result<Id, Error> {
        if self.state != State::Lobby {
            debug!(name = display_name, "registration outside the lobby rejected");
            return Err(Error::NotInLobby);
        }

        let id = self
            .roster
            .register(display_name)
            .inspect_err(|error| debug!(%error, name = display_name, "registration rejected"))?;
        debug!(player = %id, players = self.roster.len(), "player registered");
        Ok(id)
    }

    /// Opens the first question
    ///
    /// # Errors
    ///
    /// * `Error::NotInLobby` - the session has already started
    /// * `Error::EmptyRoster` - nobody has registered
    pub fn start(&mut self) -> Result<(), Error> {
        if self.state != State::Lobby {
            return Err(Error::NotInLobby);
        }
        if self.roster.is_empty() {
            debug!("start without players rejected");
            return Err(Error::EmptyRoster);
        }

        self.open_question(0);
        info!(
            players = self.roster.len(),
            questions = self.questions.len(),
            "session started"
        );
        Ok(())
    }

    /// Advances the round clock by one second
    ///
    /// Returns the new reading while a question is open. Outside a question
    /// the call does nothing and returns `None`.
    pub fn tick(&mut self) -> Option<u64> {
        match self.state {
            State::InQuestion(_) => Some(self.clock.tick()),
            State::Lobby | State::Results => None,
        }
    }

    /// Records a player's answer to the open question
    ///
    /// `question_id` names the question the player is answering. If the host
    /// has already moved past it the answer is refused rather than counted
    /// against the next question.
    ///
    /// # Errors
    ///
    /// * `Error::QuestionClosed` - no question is open or `question_id` is not the open one
    /// * `Error::Roster` - unknown player, invalid option, or already answered
    pub fn submit_answer(
        &mut self,
        player: Id,
        question_id: u64,
        chosen_index: usize,
    ) -> Result<AnswerRecord, Error> {
        let open = match self.state {
            State::InQuestion(index) => self.questions.get(index),
            State::Lobby | State::Results => None,
        };
        let Some(question) = open.filter(|question| question.id == question_id) else {
            debug!(%player, question_id, "answer to a closed question rejected");
            return Err(Error::QuestionClosed);
        };

        let elapsed = self.clock.value();
        let record = self
            .roster
            .submit_answer(player, question, chosen_index, elapsed, &self.options.scoring)
            .inspect_err(|error| debug!(%error, %player, question_id, "answer rejected"))?;

        debug!(
            %player,
            question_id,
            chosen_index,
            correct = record.is_correct,
            points = record.points_awarded,
            elapsed,
            "answer accepted"
        );
        Ok(record)
    }

    /// Closes the open question and opens the next one, or shows results
    /// after the last question
    ///
    /// Returns the state entered.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotInQuestion` if no question is open.
    pub fn advance(&mut self) -> Result<State, Error> {
        let State::InQuestion(index) = self.state else {
            return Err(Error::NotInQuestion);
        };

        self.roster.clear_current_answers();
        let next_index = index + 1;
        if next_index < self.questions.len() {
            self.open_question(next_index);
        } else {
            self.clock.reset();
            self.state = State::Results;
            info!(
                winner = self
                    .roster
                    .ranked_snapshot()
                    .first()
                    .map(|p| p.display_name()),
                "session finished"
            );
        }
        Ok(self.state)
    }

    /// Returns the session to the lobby with every score wiped
    ///
    /// Players are kept or removed according to [`Options::keep_roster`].
    /// This is accepted in any state and is the only way to abandon a
    /// session in progress.
    pub fn restart(&mut self) {
        if self.options.keep_roster {
            self.roster.reset_scores();
        } else {
            self.roster.clear();
        }
        self.clock.reset();
        self.state = State::Lobby;
        info!(players = self.roster.len(), "session restarted");
    }

    fn open_question(&mut self, index: usize) {
        self.clock.reset();
        self.state = State::InQuestion(index);
        info!(
            index,
            question_id = self.questions.get(index).map(|q| q.id),
            "question opened"
        );
    }
}

// Read accessors
impl Game {
    /// The current phase
    pub fn state(&self) -> State {
        self.state
    }

    /// The open question, if any
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            State::InQuestion(index) => self.questions.get(index),
            State::Lobby | State::Results => None,
        }
    }

    /// Seconds elapsed on the open question; zero when none is open
    pub fn clock_value(&self) -> u64 {
        self.clock.value()
    }

    /// Seconds left on the displayed countdown
    pub fn remaining_seconds(&self) -> u64 {
        self.clock.remaining(self.options.time_limit)
    }

    /// Players ranked by total points, ties in registration order
    pub fn ranked_snapshot(&self) -> Vec<&PlayerRecord> {
        self.roster.ranked_snapshot()
    }

    /// A player's record
    pub fn player(&self, id: Id) -> Option<&PlayerRecord> {
        self.roster.get(id)
    }

    /// All players in registration order
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The question bank
    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    /// The options the session was created with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// A ranked leaderboard with per-question statistics
    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::new(&self.roster, &self.questions)
    }

    /// A player's total points and position
    pub fn score(&self, id: Id) -> Option<ScoreMessage> {
        self.leaderboard().score(id)
    }
}
