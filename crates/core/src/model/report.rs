use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::AnswerOutcome;
use crate::time::Elapsed;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("answered {answered} of {total} questions")]
    Incomplete { answered: usize, total: usize },
}

/// `part / total` as a whole percentage, halves rounded up.
///
/// Returns 0 for an empty total.
#[must_use]
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    let rounded = (part * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Position within the quiz, for a progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the question on screen; 0 before anything is loaded.
    pub current: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    /// Progress for `index` (0-based) out of `total`; `None` means nothing loaded.
    #[must_use]
    pub fn at(index: Option<usize>, total: usize) -> Self {
        let Some(index) = index else {
            return Self::default();
        };
        if total == 0 {
            return Self::default();
        }
        let current = (index + 1).min(total);
        Self {
            current,
            total,
            percent: percent(current, total),
        }
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Final result of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    score: usize,
    total: usize,
    percent: u8,
    timed_out: usize,
    elapsed: Elapsed,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary from the per-question outcomes of a finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::EmptyQuiz` for zero questions and
    /// `SummaryError::Incomplete` if not every question was locked.
    ///
    /// A `completed_at` earlier than `started_at` (wall clock stepped back) is
    /// clamped to `started_at`.
    pub fn from_outcomes(
        outcomes: &[AnswerOutcome],
        total: usize,
        elapsed: Elapsed,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if total == 0 {
            return Err(SummaryError::EmptyQuiz);
        }
        if outcomes.len() != total {
            return Err(SummaryError::Incomplete {
                answered: outcomes.len(),
                total,
            });
        }
        let completed_at = completed_at.max(started_at);

        let score = outcomes.iter().filter(|o| o.is_correct()).count();
        let timed_out = outcomes
            .iter()
            .filter(|o| matches!(o, AnswerOutcome::TimedOut))
            .count();

        Ok(Self {
            score,
            total,
            percent: percent(score, total),
            timed_out,
            elapsed,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Questions that expired without a selection (already counted as wrong).
    #[must_use]
    pub fn timed_out(&self) -> usize {
        self.timed_out
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
