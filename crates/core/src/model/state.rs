use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizState {
    /// Nothing loaded yet, or reset after a restart.
    Idle,
    /// Waiting for the question source.
    Loading,
    /// A question is on screen and the countdown is running.
    Active,
    /// The current question has been answered or timed out.
    Locked,
    /// All questions are done; a summary is available.
    Finished,
    /// The question source failed; only restart leaves this state.
    Error,
}

impl QuizState {
    /// States from which a restart command is honored.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, QuizState::Finished | QuizState::Error)
    }
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizState::Idle => "idle",
            QuizState::Loading => "loading",
            QuizState::Active => "active",
            QuizState::Locked => "locked",
            QuizState::Finished => "finished",
            QuizState::Error => "error",
        };
        f.write_str(name)
    }
}

/// How a question was locked.
///
/// `TimedOut` scores the same as `Incorrect`; it is kept apart so summaries can
/// report unanswered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

impl AnswerOutcome {
    /// Outcome of comparing a (possibly missing) selection with the correct index.
    #[must_use]
    pub fn judge(selected: Option<usize>, correct_index: usize) -> Self {
        match selected {
            Some(index) if index == correct_index => AnswerOutcome::Correct,
            Some(_) => AnswerOutcome::Incorrect,
            None => AnswerOutcome::TimedOut,
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_distinguishes_timeout_from_wrong_answer() {
        assert_eq!(AnswerOutcome::judge(Some(2), 2), AnswerOutcome::Correct);
        assert_eq!(AnswerOutcome::judge(Some(0), 2), AnswerOutcome::Incorrect);
        assert_eq!(AnswerOutcome::judge(None, 2), AnswerOutcome::TimedOut);
        assert!(!AnswerOutcome::TimedOut.is_correct());
    }

    #[test]
    fn only_finished_and_error_are_terminal() {
        assert!(QuizState::Finished.is_terminal());
        assert!(QuizState::Error.is_terminal());
        assert!(!QuizState::Locked.is_terminal());
        assert!(!QuizState::Idle.is_terminal());
    }
}
