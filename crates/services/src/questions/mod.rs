mod filter;
mod record;
mod rest;
mod source;

pub use filter::QuestionFilter;
pub use record::{OptionRecord, QuestionMeta, QuestionRecord, TitleField, WireId};
pub use rest::RestQuestionSource;
pub use source::{InMemoryQuestionSource, QuestionSource};
