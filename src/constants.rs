//! Configuration constants for the quiz engine
//!
//! Limits and defaults shared by the question bank, the roster and the
//! session options.

/// Question bank limits
pub mod question {
    /// Maximum number of questions in a single bank
    pub const MAX_QUESTION_COUNT: usize = 100;
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 200;
    /// Minimum number of options a question must offer
    pub const MIN_OPTION_COUNT: usize = 2;
    /// Maximum number of options a question may offer
    pub const MAX_OPTION_COUNT: usize = 8;
    /// Maximum length of a single option's text
    pub const MAX_OPTION_LENGTH: usize = 200;
}

/// Roster limits
pub mod roster {
    /// Maximum number of players allowed in a single session
    pub const MAX_PLAYER_COUNT: usize = 1000;
    /// Maximum length of a display name in bytes
    pub const MAX_NAME_LENGTH: usize = 30;
}

/// Scoring defaults
pub mod scoring {
    /// Points for an instant correct answer under latency-decay scoring
    pub const DEFAULT_BASE_POINTS: u64 = 1000;
    /// Points for any correct answer under flat scoring
    pub const DEFAULT_FLAT_POINTS: u64 = 10;
    /// Largest configurable award for a single answer
    pub const MAX_POINTS: u64 = 1_000_000;
}

/// Round clock defaults
pub mod clock {
    /// Default countdown shown for each question, in seconds
    pub const DEFAULT_TIME_LIMIT: u64 = 15;
    /// Minimum configurable countdown, in seconds
    pub const MIN_TIME_LIMIT: u64 = 5;
    /// Maximum configurable countdown, in seconds
    pub const MAX_TIME_LIMIT: u64 = 240;
}

/// Read projection limits
pub mod view {
    /// Maximum number of names or standings sent in a single view
    pub const LIST_LIMIT: usize = 50;
}
