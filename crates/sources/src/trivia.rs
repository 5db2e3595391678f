//! Decoding of the trivia-API payload shape.
//!
//! The HTTP call itself belongs to the embedding application; this module only
//! turns a response body into question drafts. Text is passed through as-is,
//! HTML entities included.

use async_trait::async_trait;
use quiz_core::model::QuestionDraft;
use serde::Deserialize;

use crate::source::{QuestionQuery, QuestionSource, SourceError};

const CODE_SUCCESS: u8 = 0;
const CODE_NO_RESULTS: u8 = 1;

/// Wire shape of a trivia response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaResponse {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<TriviaRecord>,
}

/// One question as the trivia API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaRecord {
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

impl TriviaRecord {
    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            prompt: self.question,
            correct_option: self.correct_answer,
            incorrect_options: self.incorrect_answers,
        }
    }
}

impl TriviaResponse {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Decode` if the body is not a trivia response.
    pub fn from_json(body: &str) -> Result<Self, SourceError> {
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))
    }

    /// Convert into drafts. "No results" yields an empty list so the session
    /// reports it as an empty set rather than a transport failure.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Rejected` for any other non-success response code.
    pub fn into_drafts(self) -> Result<Vec<QuestionDraft>, SourceError> {
        match self.response_code {
            CODE_SUCCESS => Ok(self.results.into_iter().map(TriviaRecord::into_draft).collect()),
            CODE_NO_RESULTS => Ok(Vec::new()),
            code => Err(SourceError::Rejected { code }),
        }
    }
}

/// Decode a trivia response body straight into drafts.
///
/// # Errors
///
/// Returns `SourceError::Decode` or `SourceError::Rejected`.
pub fn decode_trivia(body: &str) -> Result<Vec<QuestionDraft>, SourceError> {
    TriviaResponse::from_json(body)?.into_drafts()
}

/// Source backed by a response body that was fetched elsewhere.
#[derive(Debug, Clone)]
pub struct TriviaPayloadSource {
    body: String,
}

impl TriviaPayloadSource {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl QuestionSource for TriviaPayloadSource {
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<QuestionDraft>, SourceError> {
        let mut drafts = decode_trivia(&self.body)?;
        let limit = usize::try_from(query.amount).unwrap_or(usize::MAX);
        if drafts.len() > limit {
            tracing::debug!(
                available = drafts.len(),
                limit,
                "truncating trivia payload to requested amount"
            );
            drafts.truncate(limit);
        }
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "easy",
                "category": "Geography",
                "question": "What is the capital of France?",
                "correct_answer": "Paris",
                "incorrect_answers": ["Rome", "Madrid", "Berlin"]
            }
        ]
    }"#;

    #[test]
    fn decodes_results_into_drafts() {
        let drafts = decode_trivia(BODY).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].prompt, "What is the capital of France?");
        assert_eq!(drafts[0].correct_option, "Paris");
        assert_eq!(drafts[0].incorrect_options, vec!["Rome", "Madrid", "Berlin"]);
    }

    #[test]
    fn no_results_code_is_an_empty_list() {
        let drafts = decode_trivia(r#"{"response_code":1,"results":[]}"#).unwrap();
        assert!(drafts.is_empty());
    }

    #[test]
    fn other_codes_are_rejections() {
        let err = decode_trivia(r#"{"response_code":5,"results":[]}"#).unwrap_err();
        assert_eq!(err, SourceError::Rejected { code: 5 });
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            decode_trivia("<html>down</html>"),
            Err(SourceError::Decode(_))
        ));
    }
}
