//! Display name validation
//!
//! Names are trimmed, checked for length and content, and must be unique
//! within a session. Uniqueness is case-sensitive: "Ana" and "ana" are
//! different players.

use std::collections::HashSet;

use rustrict::CensorStr;
use serde::Serialize;
use thiserror::Error;

use crate::constants::roster::MAX_NAME_LENGTH;

/// Errors that can occur while claiming a display name
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested name is already in use by another player
    #[error("name already in-use")]
    Used,
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name contains inappropriate content
    #[error("name is inappropriate")]
    Sinful,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// The set of names claimed in a session
#[derive(Debug, Default, Clone)]
pub struct Names {
    taken: HashSet<String>,
}

impl Names {
    /// Validates `name` and reserves it
    ///
    /// Returns the trimmed name that was reserved.
    ///
    /// # Errors
    ///
    /// * `Error::TooLong` - name exceeds the maximum length before trimming
    /// * `Error::Empty` - name is empty after trimming whitespace
    /// * `Error::Sinful` - name contains inappropriate content
    /// * `Error::Used` - name is already taken by another player
    pub fn claim(&mut self, name: &str) -> Result<String, Error> {
        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::TooLong);
        }
        let name = rustrict::trim_whitespace(name);
        if name.is_empty() {
            return Err(Error::Empty);
        }
        if name.is_inappropriate() {
            return Err(Error::Sinful);
        }
        if !self.taken.insert(name.to_owned()) {
            return Err(Error::Used);
        }
        Ok(name.to_owned())
    }

    /// Whether `name` is already reserved
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Releases every reserved name
    pub fn clear(&mut self) {
        self.taken.clear();
    }
}
