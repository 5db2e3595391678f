#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod timers;

pub use quiz_core::{Clock, QuizSettings};
pub use sessions as session;

pub use error::{RunnerClosed, SessionError};
pub use sessions::{
    QuizCommand, QuizEvent, QuizHandle, QuizLoopService, QuizRunner, QuizSession, QuizSnapshot,
    progress, shuffle, summary,
};
pub use timers::{Countdown, CountdownEvent, Stopwatch, TimerHandle, TimerKind};
