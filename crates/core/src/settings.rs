use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question time limit must be > 0")]
    InvalidTimeLimit,

    #[error("advance delay must be > 0")]
    InvalidAdvanceDelay,

    #[error("time unit must be longer than zero")]
    InvalidUnit,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing configuration for a quiz attempt.
///
/// Limits are expressed in whole time units; `unit` is the wall-clock length of
/// one unit when a session is driven by the async runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    question_time_limit: u32,
    advance_delay: u32,
    unit: Duration,
}

impl QuizSettings {
    pub const DEFAULT_TIME_LIMIT: u32 = 30;
    pub const DEFAULT_ADVANCE_DELAY: u32 = 3;

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any limit is zero.
    pub fn new(
        question_time_limit: u32,
        advance_delay: u32,
        unit: Duration,
    ) -> Result<Self, SettingsError> {
        if question_time_limit == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if advance_delay == 0 {
            return Err(SettingsError::InvalidAdvanceDelay);
        }
        if unit.is_zero() {
            return Err(SettingsError::InvalidUnit);
        }

        Ok(Self {
            question_time_limit,
            advance_delay,
            unit,
        })
    }

    /// Re-check a value that came from outside (e.g. deserialized).
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any limit is zero.
    pub fn validate(self) -> Result<Self, SettingsError> {
        Self::new(self.question_time_limit, self.advance_delay, self.unit)
    }

    #[must_use]
    pub fn question_time_limit(&self) -> u32 {
        self.question_time_limit
    }

    #[must_use]
    pub fn advance_delay(&self) -> u32 {
        self.advance_delay
    }

    #[must_use]
    pub fn unit(&self) -> Duration {
        self.unit
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_time_limit: Self::DEFAULT_TIME_LIMIT,
            advance_delay: Self::DEFAULT_ADVANCE_DELAY,
            unit: Duration::from_secs(1),
        }
    }
}
