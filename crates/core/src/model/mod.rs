mod question;
mod report;
mod shuffled;
mod state;

pub use question::{Question, QuestionDraft, QuestionError, QuestionSet, QuestionSetError};
pub use report::{Progress, QuizSummary, SummaryError, percent};
pub use shuffled::ShuffledQuestion;
pub use state::{AnswerOutcome, QuizState};
