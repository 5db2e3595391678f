//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionSetError, QuizState};
use sources::SourceError;

use crate::timers::TimerHandle;

/// Why an attempt ended in the Error state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
}

impl SessionError {
    /// True when the source itself could not be used, as opposed to returning
    /// an empty or malformed set.
    #[must_use]
    pub fn is_source_failure(&self) -> bool {
        matches!(self, SessionError::Source(_))
    }
}

/// A signal that arrived when the state machine could not act on it.
///
/// These come from benign races between input and timers; they are logged and
/// dropped, never returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuardViolation {
    #[error("{signal} ignored in state {state}")]
    WrongState {
        signal: &'static str,
        state: QuizState,
    },
    #[error("question already answered")]
    AlreadySelected,
    #[error("option {index} out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("stale timer {0:?}")]
    StaleTimer(TimerHandle),
}

impl GuardViolation {
    pub(crate) fn absorb<T: Default>(self) -> T {
        tracing::debug!(violation = %self, "ignoring signal");
        T::default()
    }
}

/// The runner task behind a `QuizHandle` has stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("quiz runner has stopped")]
pub struct RunnerClosed;
