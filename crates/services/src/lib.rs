#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod questions;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use config::ApiConfig;
pub use error::{FetchError, SessionError};
pub use questions::{InMemoryQuestionSource, QuestionFilter, QuestionSource, RestQuestionSource};
pub use sessions::{
    LoadOutcome, Liveness, PracticeLoopService, QuestionSlot, QuizSession, SessionPlanner,
    SessionProgress,
};
