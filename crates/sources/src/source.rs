use async_trait::async_trait;
use quiz_core::model::QuestionDraft;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question source unavailable: {0}")]
    Unavailable(String),

    #[error("could not decode question payload: {0}")]
    Decode(String),

    #[error("question source rejected the request (code {code})")]
    Rejected { code: u8 },
}

//
// ─── QUERY ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Multiple,
    Boolean,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        })
    }
}

/// What to ask the question source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionQuery {
    pub amount: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, rename = "type")]
    pub kind: QuestionKind,
}

impl QuestionQuery {
    pub const DEFAULT_AMOUNT: u32 = 5;

    #[must_use]
    pub fn new(amount: u32) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Query-string form understood by trivia HTTP endpoints.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!(
            "amount={}&difficulty={}&type={}",
            self.amount, self.difficulty, self.kind
        )
    }
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
            difficulty: Difficulty::default(),
            kind: QuestionKind::default(),
        }
    }
}

//
// ─── SOURCE CONTRACT ───────────────────────────────────────────────────────────
//

/// Input collaborator that supplies the question set for one attempt.
///
/// Drafts are returned unvalidated; the session decides whether the set is usable.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch questions for a new attempt.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source cannot be reached or answers with
    /// something that is not a question list.
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<QuestionDraft>, SourceError>;
}

/// Simple in-memory source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryQuestionSource {
    questions: Arc<Mutex<Vec<QuestionDraft>>>,
    failure: Arc<Mutex<Option<SourceError>>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<QuestionDraft>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
            failure: Arc::new(Mutex::new(None)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every fetch fails with `error`.
    #[must_use]
    pub fn failing(error: SourceError) -> Self {
        let source = Self::new(Vec::new());
        source.fail_with(Some(error));
        source
    }

    /// Replace the stored questions.
    pub fn set_questions(&self, questions: Vec<QuestionDraft>) {
        if let Ok(mut guard) = self.questions.lock() {
            *guard = questions;
        }
    }

    /// Make subsequent fetches fail (or succeed again with `None`).
    pub fn fail_with(&self, error: Option<SourceError>) {
        if let Ok(mut guard) = self.failure.lock() {
            *guard = error;
        }
    }

    /// Number of fetches served so far, successful or not.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<QuestionDraft>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .failure
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?
            .clone();
        if let Some(error) = failure {
            return Err(error);
        }

        let guard = self
            .questions
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let limit = usize::try_from(query.amount).unwrap_or(usize::MAX);
        Ok(guard.iter().take(limit).cloned().collect())
    }
}
