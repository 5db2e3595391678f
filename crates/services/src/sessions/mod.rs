mod report;
mod runner;
mod service;
mod shuffler;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use report::{progress, summary};
pub use runner::{QuizCommand, QuizHandle, QuizRunner};
pub use service::QuizSession;
pub use shuffler::shuffle;
pub use view::{QuizEvent, QuizSnapshot};
pub use workflow::QuizLoopService;
