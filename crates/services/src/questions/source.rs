use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use quiz_core::model::Question;

use crate::error::FetchError;
use super::filter::QuestionFilter;

/// Anything that can hand out practice questions for a filter.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch a fresh list of questions. Implementations do not cache between calls.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the questions cannot be retrieved or decoded.
    async fn fetch_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, FetchError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    questions: Vec<Question>,
    failure: Option<String>,
    requests: Vec<QuestionFilter>,
}

/// Fixed question pool, for tests and offline use.
///
/// Returns the whole pool for every filter and records the filters it saw.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState {
                questions,
                ..InMemoryState::default()
            })),
        }
    }

    /// Make subsequent fetches fail with `FetchError::Unavailable`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unavailable` if the internal lock is poisoned.
    pub fn fail_with(&self, message: impl Into<String>) -> Result<(), FetchError> {
        self.lock()?.failure = Some(message.into());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `FetchError::Unavailable` if the internal lock is poisoned.
    pub fn replace_questions(&self, questions: Vec<Question>) -> Result<(), FetchError> {
        let mut state = self.lock()?;
        state.questions = questions;
        state.failure = None;
        Ok(())
    }

    /// Filters received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unavailable` if the internal lock is poisoned.
    pub fn requests(&self) -> Result<Vec<QuestionFilter>, FetchError> {
        Ok(self.lock()?.requests.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, FetchError> {
        self.state
            .lock()
            .map_err(|e| FetchError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, FetchError> {
        let mut state = self.lock()?;
        state.requests.push(*filter);
        if let Some(message) = &state.failure {
            return Err(FetchError::Unavailable(message.clone()));
        }
        Ok(state.questions.clone())
    }
}
