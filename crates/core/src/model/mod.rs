mod answers;
mod ids;
mod question;
mod result;

pub use answers::AnswerMap;
pub use ids::{OptionId, QuestionId};
pub use question::{Question, QuestionError, QuestionOption};
pub use result::{QuestionOutcome, QuestionResult, ResultSummary};
