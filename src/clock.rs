//! Per-question elapsed-time counter
//!
//! The clock does not read wall time. An external scheduler calls
//! [`RoundClock::tick`] once a second while a question is open.

use serde::{Deserialize, Serialize};

/// Whole seconds elapsed since the active question opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    elapsed: u64,
}

impl RoundClock {
    /// Advances the clock by one second and returns the new reading
    pub fn tick(&mut self) -> u64 {
        self.elapsed = self.elapsed.saturating_add(1);
        self.elapsed
    }

    /// Sets the clock back to zero
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Current reading in seconds
    pub fn value(&self) -> u64 {
        self.elapsed
    }

    /// Seconds left before `limit` is reached, never below zero
    pub fn remaining(&self, limit: u64) -> u64 {
        limit.saturating_sub(self.elapsed)
    }
}
