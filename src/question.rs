//! Question bank
//!
//! The bank is an ordered, immutable list of multiple choice questions.
//! It is validated once when built and is only ever read afterwards, so a
//! single bank can be shared by any number of sessions.

use std::collections::HashSet;

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::question::{
    MAX_OPTION_COUNT, MAX_OPTION_LENGTH, MAX_PROMPT_LENGTH, MAX_QUESTION_COUNT, MIN_OPTION_COUNT,
};

/// A single multiple choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Stable identifier, unique within a bank
    #[garde(skip)]
    pub id: u64,
    /// The text shown to players
    #[garde(length(max = MAX_PROMPT_LENGTH))]
    pub prompt: String,
    /// Answer options in display order
    #[garde(length(min = MIN_OPTION_COUNT, max = MAX_OPTION_COUNT), inner(length(max = MAX_OPTION_LENGTH)))]
    pub options: Vec<String>,
    /// Index into `options` of the one correct answer
    #[garde(skip)]
    pub correct_index: usize,
}

impl Question {
    /// Creates a question from its parts without validating it
    ///
    /// Validation happens when the question is placed into a [`QuestionBank`].
    pub fn new<P: Into<String>, O: Into<String>>(
        id: u64,
        prompt: P,
        options: impl IntoIterator<Item = O>,
        correct_index: usize,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_index,
        }
    }

    /// Whether `index` names one of this question's options
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// Whether `index` is the correct option
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Errors raised while building a question bank
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bank was given no questions
    #[error("question bank is empty")]
    Empty,
    /// The bank holds more questions than allowed
    #[error("question bank holds more than {} questions", MAX_QUESTION_COUNT)]
    TooMany,
    /// Two questions share the same id
    #[error("question id {0} is used more than once")]
    DuplicateId(u64),
    /// A question's correct index does not name one of its options
    #[error("question {0} has a correct index outside its options")]
    CorrectIndexOutOfRange(u64),
    /// A question failed field validation
    #[error("question {id} is invalid: {reason}")]
    Invalid {
        /// The offending question
        id: u64,
        /// The validation report
        reason: String,
    },
}

/// An ordered, non-empty, validated list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank, validating every question
    ///
    /// # Errors
    ///
    /// * `Error::Empty` - no questions were supplied
    /// * `Error::TooMany` - more than the allowed number of questions
    /// * `Error::Invalid` - a prompt or option breaks a length limit, or the
    ///   option count is out of range
    /// * `Error::CorrectIndexOutOfRange` - a correct index names no option
    /// * `Error::DuplicateId` - two questions share an id
    pub fn new(questions: Vec<Question>) -> Result<Self, Error> {
        if questions.is_empty() {
            return Err(Error::Empty);
        }
        if questions.len() > MAX_QUESTION_COUNT {
            return Err(Error::TooMany);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            question.validate().map_err(|report| Error::Invalid {
                id: question.id,
                reason: report.to_string(),
            })?;
            if !question.has_option(question.correct_index) {
                return Err(Error::CorrectIndexOutOfRange(question.id));
            }
            if !seen.insert(question.id) {
                return Err(Error::DuplicateId(question.id));
            }
        }

        Ok(Self { questions })
    }

    /// Number of questions in the bank
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank has no questions; never true for a bank built through `new`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Position of the question with the given id
    pub fn position(&self, id: u64) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// All questions in order
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionBank {
    type Error = Error;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionBank> for Vec<Question> {
    fn from(bank: QuestionBank) -> Self {
        bank.questions
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sample_question(id: u64) -> Question {
        Question::new(
            id,
            "What does CFD stand for?",
            [
                "Control Flow Dynamics",
                "Computational Fluid Dynamics",
                "Critical Flow Derivative",
                "Complex Fluid Data",
            ],
            1,
        )
    }

    #[test]
    fn test_bank_new_valid() {
        let bank = QuestionBank::new(vec![sample_question(1), sample_question(2)]).unwrap();

        assert_eq!(bank.len(), 2);
        assert!(!bank.is_empty());
        assert_eq!(bank.get(1).map(|q| q.id), Some(2));
        assert_eq!(bank.position(2), Some(1));
        assert_eq!(bank.position(7), None);
    }

    #[test]
    fn test_bank_empty() {
        assert_eq!(QuestionBank::new(vec![]), Err(Error::Empty));
    }

    #[test]
    fn test_bank_too_many() {
        let questions = (0..=MAX_QUESTION_COUNT as u64).map(sample_question).collect();
        assert_eq!(QuestionBank::new(questions), Err(Error::TooMany));
    }

    #[test]
    fn test_bank_duplicate_id() {
        let result = QuestionBank::new(vec![sample_question(3), sample_question(3)]);
        assert_eq!(result, Err(Error::DuplicateId(3)));
    }

    #[test]
    fn test_bank_correct_index_out_of_range() {
        let mut question = sample_question(4);
        question.correct_index = 4;
        assert_eq!(
            QuestionBank::new(vec![question]),
            Err(Error::CorrectIndexOutOfRange(4))
        );
    }

    #[test]
    fn test_bank_too_few_options() {
        let question = Question::new(5, "Pick one", ["only"], 0);
        assert!(matches!(
            QuestionBank::new(vec![question]),
            Err(Error::Invalid { id: 5, .. })
        ));
    }

    #[test]
    fn test_bank_prompt_too_long() {
        let question = Question::new(6, "a".repeat(MAX_PROMPT_LENGTH + 1), ["x", "y"], 0);
        assert!(matches!(
            QuestionBank::new(vec![question]),
            Err(Error::Invalid { id: 6, .. })
        ));
    }

    #[test]
    fn test_question_option_checks() {
        let question = sample_question(1);
        assert!(question.has_option(3));
        assert!(!question.has_option(4));
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn test_bank_deserialize_rejects_empty() {
        let result: Result<QuestionBank, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_bank_deserialize() {
        let json = r#"[{"id":1,"prompt":"Q","options":["a","b"],"correct_index":1}]"#;
        let bank: QuestionBank = serde_json::from_str(json).unwrap();
        assert_eq!(bank.get(0).map(|q| q.correct_index), Some(1));
    }
}
