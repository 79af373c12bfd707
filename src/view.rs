//! Read projections for the host and player screens
//!
//! Both projections are built from the same [`Game`] and never mutate it.
//! A presentation layer picks whichever one matches the screen it renders
//! and calls back into [`Game`] for every action.

use enum_map::EnumMap;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    TruncatedVec,
    constants::view::LIST_LIMIT,
    game::{Game, State},
    leaderboard::{Outcome, ScoreMessage},
    question::Question,
    roster::Id,
};

/// The open question as shown on screen
#[derive(Debug, Clone, Serialize)]
pub struct QuestionCard {
    /// Zero-based position in the bank
    pub index: usize,
    /// Number of questions in the bank
    pub count: usize,
    /// The question's id, echoed back when answering
    pub question_id: u64,
    /// The question text
    pub prompt: String,
    /// Option texts in display order
    pub options: Vec<String>,
    /// Seconds elapsed on the round clock
    pub elapsed: u64,
    /// Seconds left on the countdown
    pub remaining: u64,
}

impl QuestionCard {
    fn new(game: &Game, index: usize, question: &Question) -> Self {
        Self {
            index,
            count: game.questions().len(),
            question_id: question.id,
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            elapsed: game.clock_value(),
            remaining: game.remaining_seconds(),
        }
    }
}

/// What the host screen shows
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub enum HostView {
    /// Players who have joined so far
    Lobby {
        /// Display names in registration order
        players: TruncatedVec<String>,
    },
    /// The open question and answer progress
    Question {
        /// The question on screen
        card: QuestionCard,
        /// Players who have answered
        answered: usize,
        /// Players registered
        players: usize,
    },
    /// Final standings
    Results {
        /// The top-ranked player, absent when nobody played
        winner: Option<String>,
        /// Names and totals, best first
        leaderboard: TruncatedVec<(String, u64)>,
        /// Outcome counts per question
        stats: Vec<EnumMap<Outcome, usize>>,
    },
}

impl HostView {
    /// Projects the session onto the host screen
    pub fn new(game: &Game) -> Self {
        match game.state() {
            State::Lobby => Self::Lobby {
                players: TruncatedVec::new(
                    game.roster().iter().map(|p| p.display_name().to_owned()),
                    LIST_LIMIT,
                    game.roster().len(),
                ),
            },
            State::InQuestion(index) => match game.current_question() {
                Some(question) => Self::Question {
                    card: QuestionCard::new(game, index, question),
                    answered: game.roster().answered_count(),
                    players: game.roster().len(),
                },
                None => Self::results(game),
            },
            State::Results => Self::results(game),
        }
    }

    fn results(game: &Game) -> Self {
        let leaderboard = game.leaderboard();
        Self::Results {
            winner: leaderboard.winner().map(|s| s.name.clone()),
            leaderboard: leaderboard.top(LIST_LIMIT),
            stats: leaderboard.question_summary().to_vec(),
        }
    }
}

/// What a single player's screen shows
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub enum PlayerView {
    /// Waiting for the host to start
    Lobby {
        /// The player's own name
        name: String,
        /// Players registered so far
        players: usize,
    },
    /// The open question
    Question {
        /// The question on screen
        card: QuestionCard,
        /// The option this player picked, once answered
        chosen: Option<usize>,
        /// The correct option, revealed once this player has answered
        correct_index: Option<usize>,
        /// The player's running total
        points: u64,
    },
    /// Final standings from this player's point of view
    Results {
        /// The player's total and position
        score: Option<ScoreMessage>,
        /// Points earned on each question
        points: Vec<u64>,
        /// The top-ranked player
        winner: Option<String>,
        /// Names and totals, best first
        leaderboard: TruncatedVec<(String, u64)>,
    },
}

impl PlayerView {
    /// Projects the session onto one player's screen
    ///
    /// Returns `None` if `id` is not registered.
    pub fn new(game: &Game, id: Id) -> Option<Self> {
        let player = game.player(id)?;

        Some(match (game.state(), game.current_question()) {
            (State::Lobby, _) => Self::Lobby {
                name: player.display_name().to_owned(),
                players: game.roster().len(),
            },
            (State::InQuestion(index), Some(question)) => {
                let chosen = player.current_answer();
                Self::Question {
                    card: QuestionCard::new(game, index, question),
                    chosen,
                    correct_index: chosen.map(|_| question.correct_index),
                    points: player.total_points(),
                }
            }
            (State::InQuestion(_) | State::Results, _) => {
                let leaderboard = game.leaderboard();
                Self::Results {
                    score: leaderboard.score(id),
                    points: leaderboard.player_points(id),
                    winner: leaderboard.winner().map(|s| s.name.clone()),
                    leaderboard: leaderboard.top(LIST_LIMIT),
                }
            }
        })
    }
}
