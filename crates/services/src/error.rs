//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionId};

/// Errors emitted while fetching questions from the CMS.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("question response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("question record {index} could not be decoded: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("question {id} is malformed: {source}")]
    InvalidQuestion {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
    #[error("invalid question endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this practice session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
