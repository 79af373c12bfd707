//! Standings and end-of-game statistics
//!
//! A [`Leaderboard`] is a read-only snapshot built from the roster. It ranks
//! players by total points (ties keep registration order), assigns positions,
//! and summarizes how each question went.

use std::collections::HashMap;

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    TruncatedVec,
    question::QuestionBank,
    roster::{Id, Roster},
};

/// One row of the ranked leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// The player
    pub id: Id,
    /// The player's display name
    pub name: String,
    /// Total points
    pub points: u64,
    /// Rank, starting at 1
    pub position: usize,
}

/// Score information for a single player
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMessage {
    /// Total points earned by the player
    pub points: u64,
    /// Current position in the leaderboard (1-indexed)
    pub position: usize,
}

/// How a player fared on one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize)]
pub enum Outcome {
    /// Picked the correct option
    Correct,
    /// Picked a wrong option
    Incorrect,
    /// Never answered before the question closed
    Unanswered,
}

/// Ranked snapshot of a session
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    standings: Vec<Standing>,
    /// For each question in bank order, the outcome counts
    question_summary: Vec<EnumMap<Outcome, usize>>,
    /// For each player, points earned on each question in bank order
    #[serde(skip)]
    player_points: HashMap<Id, Vec<u64>>,
}

impl Leaderboard {
    /// Builds the leaderboard from the current roster
    pub fn new(roster: &Roster, questions: &QuestionBank) -> Self {
        let standings = roster
            .ranked_snapshot()
            .into_iter()
            .enumerate()
            .map(|(index, player)| Standing {
                id: player.id(),
                name: player.display_name().to_owned(),
                points: player.total_points(),
                position: index + 1,
            })
            .collect_vec();

        let question_summary = questions
            .iter()
            .map(|question| {
                roster.iter().fold(EnumMap::<Outcome, usize>::default(), |mut counts, player| {
                    let outcome = match player.answer_for(question.id) {
                        Some(answer) if answer.is_correct => Outcome::Correct,
                        Some(_) => Outcome::Incorrect,
                        None => Outcome::Unanswered,
                    };
                    counts[outcome] += 1;
                    counts
                })
            })
            .collect_vec();

        let player_points = roster
            .iter()
            .map(|player| {
                let points = questions
                    .iter()
                    .map(|question| {
                        player
                            .answer_for(question.id)
                            .map_or(0, |answer| answer.points_awarded)
                    })
                    .collect_vec();
                (player.id(), points)
            })
            .collect();

        Self {
            standings,
            question_summary,
            player_points,
        }
    }

    /// All standings, best first
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// The top-ranked player, or `None` when nobody played
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Points and position of a player
    pub fn score(&self, id: Id) -> Option<ScoreMessage> {
        self.standings
            .iter()
            .find(|standing| standing.id == id)
            .map(|standing| ScoreMessage {
                points: standing.points,
                position: standing.position,
            })
    }

    /// Names and totals for display, capped at `limit` rows
    pub fn top(&self, limit: usize) -> TruncatedVec<(String, u64)> {
        TruncatedVec::new(
            self.standings.iter().map(|s| (s.name.clone(), s.points)),
            limit,
            self.standings.len(),
        )
    }

    /// Outcome counts for every question, in bank order
    pub fn question_summary(&self) -> &[EnumMap<Outcome, usize>] {
        &self.question_summary
    }

    /// Points a player earned on each question, zero where unanswered
    ///
    /// Unknown players get a row of zeros.
    pub fn player_points(&self, id: Id) -> Vec<u64> {
        self.player_points
            .get(&id)
            .cloned()
            .unwrap_or_else(|| vec![0; self.question_summary.len()])
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{question::Question, scoring::Scoring};

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::new(1, "Q1", ["a", "b", "c"], 0),
            Question::new(2, "Q2", ["a", "b"], 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_leaderboard() {
        let leaderboard = Leaderboard::new(&Roster::default(), &bank());

        assert!(leaderboard.standings().is_empty());
        assert!(leaderboard.winner().is_none());
        assert_eq!(leaderboard.question_summary().len(), 2);
        assert_eq!(leaderboard.question_summary()[0][Outcome::Unanswered], 0);
        assert_eq!(leaderboard.top(10).exact_count(), 0);
    }

    #[test]
    fn test_standings_and_positions() {
        let bank = bank();
        let scoring = Scoring::default();
        let mut roster = Roster::default();
        let ana = roster.register("Ana").unwrap();
        let ben = roster.register("Ben").unwrap();
        let cat = roster.register("Cat").unwrap();

        let q1 = bank.get(0).unwrap();
        let q2 = bank.get(1).unwrap();
        roster.submit_answer(ben, q1, 0, 2, &scoring).unwrap();
        roster.submit_answer(ana, q1, 1, 1, &scoring).unwrap();
        roster.submit_answer(ana, q2, 1, 4, &scoring).unwrap();

        let leaderboard = Leaderboard::new(&roster, &bank);

        let rows = leaderboard
            .standings()
            .iter()
            .map(|s| (s.name.as_str(), s.points, s.position))
            .collect_vec();
        assert_eq!(rows, [("Ben", 998, 1), ("Ana", 996, 2), ("Cat", 0, 3)]);

        assert_eq!(leaderboard.winner().map(|s| s.id), Some(ben));
        assert_eq!(
            leaderboard.score(cat),
            Some(ScoreMessage {
                points: 0,
                position: 3
            })
        );
        assert_eq!(leaderboard.score(Id::new()), None);

        let q1_summary = &leaderboard.question_summary()[0];
        assert_eq!(q1_summary[Outcome::Correct], 1);
        assert_eq!(q1_summary[Outcome::Incorrect], 1);
        assert_eq!(q1_summary[Outcome::Unanswered], 1);

        assert_eq!(leaderboard.player_points(ana), vec![0, 996]);
        assert_eq!(leaderboard.player_points(cat), vec![0, 0]);
        assert_eq!(leaderboard.player_points(Id::new()), vec![0, 0]);
    }

    #[test]
    fn test_top_truncates() {
        let bank = bank();
        let mut roster = Roster::default();
        for name in ["Ana", "Ben", "Cat"] {
            roster.register(name).unwrap();
        }

        let top = Leaderboard::new(&roster, &bank).top(2);
        assert_eq!(top.exact_count(), 3);
        assert_eq!(
            top.items(),
            &[("Ana".to_string(), 0), ("Ben".to_string(), 0)]
        );
    }
}
