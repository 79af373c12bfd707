//! Point awards for correct answers
//!
//! Two policies are supported: latency-decay, where an answer loses one
//! point for every second that passed since the question opened, and flat,
//! where every correct answer is worth the same.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::scoring::{DEFAULT_BASE_POINTS, DEFAULT_FLAT_POINTS, MAX_POINTS};

/// How correct answers are rewarded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Points decrease with elapsed time, floored at zero
    #[default]
    LatencyDecay,
    /// A fixed award regardless of elapsed time
    Flat,
}

/// Scoring configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Scoring {
    /// Active scoring policy
    #[garde(skip)]
    pub mode: ScoringMode,
    /// Award for an instant correct answer under latency-decay
    #[garde(range(min = 1, max = MAX_POINTS))]
    pub base_points: u64,
    /// Award for any correct answer under flat scoring
    #[garde(range(min = 1, max = MAX_POINTS))]
    pub flat_points: u64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            base_points: DEFAULT_BASE_POINTS,
            flat_points: DEFAULT_FLAT_POINTS,
        }
    }
}

impl Scoring {
    /// Flat scoring with the default award
    pub fn flat() -> Self {
        Self {
            mode: ScoringMode::Flat,
            ..Self::default()
        }
    }

    /// Points a correct answer earns after `elapsed_seconds`
    ///
    /// Under latency-decay this is `base_points - elapsed_seconds`, never
    /// below zero. Under flat scoring it is always `flat_points`.
    pub fn compute_points(&self, elapsed_seconds: u64) -> u64 {
        match self.mode {
            ScoringMode::LatencyDecay => self.base_points.saturating_sub(elapsed_seconds),
            ScoringMode::Flat => self.flat_points,
        }
    }

    /// Points for an answer that may or may not be correct
    pub fn award(&self, is_correct: bool, elapsed_seconds: u64) -> u64 {
        if is_correct {
            self.compute_points(elapsed_seconds)
        } else {
            0
        }
    }
}
