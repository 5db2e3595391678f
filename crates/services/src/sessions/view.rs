use quiz_core::Elapsed;
use quiz_core::model::{AnswerOutcome, Progress, QuizState, QuizSummary, ShuffledQuestion};

use crate::error::SessionError;

/// Notification emitted by a session transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    StateChanged(QuizState),
    /// A question (0-based `index`) is on screen with freshly shuffled options.
    QuestionShown { index: usize, total: usize },
    CountdownTick { remaining: u32 },
    CountdownExpired,
    ElapsedTick(Elapsed),
    /// The question was locked; the correct option is now revealed.
    AnswerLocked {
        index: usize,
        selected: Option<usize>,
        correct_index: usize,
        outcome: AnswerOutcome,
    },
    Finished(QuizSummary),
    Failed(SessionError),
    /// A restart returned the session to Idle.
    Reset,
}

/// Everything a presentation layer needs to draw the quiz at one instant.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub state: QuizState,
    pub question: Option<ShuffledQuestion>,
    pub selected: Option<usize>,
    /// Set once the current question is locked.
    pub revealed_correct: Option<usize>,
    pub progress: Progress,
    pub score: usize,
    pub countdown_remaining: u32,
    pub elapsed: Elapsed,
    pub summary: Option<QuizSummary>,
    pub failure: Option<SessionError>,
}

impl QuizSnapshot {
    /// Snapshot of a session that has not started.
    #[must_use]
    pub fn idle(countdown_remaining: u32) -> Self {
        Self {
            state: QuizState::Idle,
            question: None,
            selected: None,
            revealed_correct: None,
            progress: Progress::default(),
            score: 0,
            countdown_remaining,
            elapsed: Elapsed::ZERO,
            summary: None,
            failure: None,
        }
    }
}
