#![forbid(unsafe_code)]

pub mod source;
pub mod trivia;

pub use source::{
    Difficulty, InMemoryQuestionSource, QuestionKind, QuestionQuery, QuestionSource, SourceError,
};
pub use trivia::{TriviaPayloadSource, TriviaResponse, decode_trivia};
