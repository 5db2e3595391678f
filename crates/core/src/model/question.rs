use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("correct option cannot be empty")]
    EmptyCorrectOption,

    #[error("incorrect option {index} cannot be empty")]
    EmptyIncorrectOption { index: usize },

    #[error("incorrect option {index} repeats the correct option")]
    DuplicateCorrectOption { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set is empty")]
    Empty,

    #[error("question {index} is malformed: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as handed over by a question source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub correct_option: String,
    #[serde(default)]
    pub incorrect_options: Vec<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        correct_option: impl Into<String>,
        incorrect_options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_option: correct_option.into(),
            incorrect_options: incorrect_options.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// Zero incorrect options is accepted and yields a one-option question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for blank text or an incorrect option equal to
    /// the correct one.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.correct_option.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectOption);
        }
        for (index, option) in self.incorrect_options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyIncorrectOption { index });
            }
            if option.trim() == self.correct_option.trim() {
                return Err(QuestionError::DuplicateCorrectOption { index });
            }
        }

        Ok(Question {
            prompt: self.prompt,
            correct_option: self.correct_option,
            incorrect_options: self.incorrect_options,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One quiz item. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_option: String,
    incorrect_options: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn incorrect_options(&self) -> &[String] {
        &self.incorrect_options
    }

    /// Number of options shown for this question.
    #[must_use]
    pub fn option_count(&self) -> usize {
        1 + self.incorrect_options.len()
    }

    /// All options, correct option first.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.option_count());
        options.push(self.correct_option.clone());
        options.extend(self.incorrect_options.iter().cloned());
        options
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered, non-empty, immutable sequence of questions for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate every draft; the whole set is rejected if any item is malformed.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for no drafts, or
    /// `QuestionSetError::Invalid` naming the first malformed item.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, QuestionSetError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| QuestionSetError::Invalid { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}
