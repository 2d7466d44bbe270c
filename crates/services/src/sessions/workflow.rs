use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Question, ResultSummary};

use crate::error::SessionError;
use crate::questions::{QuestionFilter, QuestionSource};
use super::liveness::Liveness;
use super::plan::SessionPlanner;
use super::service::QuizSession;

/// What a load produced once the fetch resolved.
#[derive(Debug)]
pub enum LoadOutcome {
    Ready(QuizSession),
    /// The owner retired its [`Liveness`] while the fetch was in flight.
    Discarded,
}

impl LoadOutcome {
    #[must_use]
    pub fn into_session(self) -> Option<QuizSession> {
        match self {
            LoadOutcome::Ready(session) => Some(session),
            LoadOutcome::Discarded => None,
        }
    }
}

/// Orchestrates fetch, session start and scoring for practice attempts.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    shuffle: bool,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            clock,
            source,
            shuffle: false,
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fetch questions for `filter` and start a session over them.
    ///
    /// If `liveness` was retired before the fetch resolved, the result
    /// (success or failure) is dropped and `LoadOutcome::Discarded` returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Fetch` when the fetch fails and
    /// `SessionError::Empty` when it yields no questions.
    pub async fn start_session(
        &self,
        filter: &QuestionFilter,
        liveness: &Liveness,
    ) -> Result<LoadOutcome, SessionError> {
        let fetched = self.source.fetch_questions(filter).await;

        if !liveness.is_alive() {
            log::debug!("discarding practice questions for {filter:?}: owner went away");
            return Ok(LoadOutcome::Discarded);
        }

        let questions = fetched?;
        self.start_from_questions(questions).map(LoadOutcome::Ready)
    }

    /// Start a session over questions the caller already holds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn start_from_questions(
        &self,
        questions: Vec<Question>,
    ) -> Result<QuizSession, SessionError> {
        let plan = SessionPlanner::new()
            .with_shuffle(self.shuffle)
            .plan(questions);
        let session = QuizSession::from_plan(plan, self.clock.now())?;
        log::debug!(
            "practice session started with {} questions (shuffle: {})",
            session.total(),
            self.shuffle
        );
        Ok(session)
    }

    /// Start a new session over the questions missed in `summary`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if nothing was missed.
    pub fn retry_missed(&self, summary: &ResultSummary) -> Result<QuizSession, SessionError> {
        self.start_from_questions(summary.missed_questions())
    }

    /// Complete `session` and return its score.
    ///
    /// Calling this on an already completed session keeps the original
    /// completion time and returns the same score.
    pub fn finish(&self, session: &mut QuizSession) -> ResultSummary {
        if session.complete(self.clock.now()) {
            log::debug!("practice session completed");
        }
        let summary = ResultSummary::score(session.questions(), session.answers());
        log::info!(
            "practice result: {}/{} correct, {} incorrect, {} unanswered ({}%)",
            summary.correct(),
            summary.total(),
            summary.incorrect(),
            summary.unanswered(),
            summary.percentage()
        );
        summary
    }
}
