use quiz_core::model::{Progress, QuizState, QuizSummary, SummaryError};

use super::service::QuizSession;

/// Position of the session within its question set. No side effects.
#[must_use]
pub fn progress(session: &QuizSession) -> Progress {
    Progress::at(session.current_index(), session.total_questions())
}

/// Final result, available only once the session has finished.
#[must_use]
pub fn summary(session: &QuizSession) -> Option<QuizSummary> {
    if session.state() != QuizState::Finished {
        return None;
    }
    session.summary().cloned()
}

/// Build the summary from the session's recorded outcomes.
pub(crate) fn build_summary(session: &QuizSession) -> Result<QuizSummary, SummaryError> {
    let completed_at = session.clock().now();
    let started_at = session.started_at().unwrap_or(completed_at);
    QuizSummary::from_outcomes(
        session.outcomes(),
        session.total_questions(),
        session.elapsed(),
        started_at,
        completed_at,
    )
}
