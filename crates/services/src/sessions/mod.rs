mod liveness;
mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use liveness::Liveness;
pub use plan::{SessionPlan, SessionPlanner};
pub use progress::{QuestionSlot, SessionProgress};
pub use service::QuizSession;
pub use workflow::{LoadOutcome, PracticeLoopService};
