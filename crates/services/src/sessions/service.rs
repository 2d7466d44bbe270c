use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::model::{AnswerMap, OptionId, Question, QuestionId, ResultSummary};

use crate::error::SessionError;
use super::plan::{SessionPlan, SessionPlanner};
use super::progress::{QuestionSlot, SessionProgress};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-memory practice attempt.
///
/// Holds the fixed question order, the cursor, and the answers given so
/// far. A value of this type always has at least one question, so the
/// cursor is always a valid index.
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: AnswerMap,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `questions`, shuffling them once if asked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn initialize(
        questions: Vec<Question>,
        shuffle: bool,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let plan = SessionPlanner::new().with_shuffle(shuffle).plan(questions);
        Self::from_plan(plan, started_at)
    }

    /// Like [`QuizSession::initialize`], drawing the shuffle from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn initialize_with_rng<R: Rng + ?Sized>(
        questions: Vec<Question>,
        shuffle: bool,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let plan = SessionPlanner::new()
            .with_shuffle(shuffle)
            .plan_with_rng(questions, rng);
        Self::from_plan(plan, started_at)
    }

    pub(crate) fn from_plan(
        plan: SessionPlan,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            questions: plan.questions,
            current: 0,
            answers: AnswerMap::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn answer_for(&self, question: QuestionId) -> Option<&OptionId> {
        self.answers.get(question)
    }

    #[must_use]
    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.answers.contains(question)
    }

    /// Number of session questions with an answer.
    ///
    /// Answers stored for ids outside the session are not counted, so this
    /// never exceeds [`QuizSession::total`].
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains(q.id()))
            .count()
    }

    #[must_use]
    pub fn contains_question(&self, question: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id() == question)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.total(),
            answered,
            unanswered: self.total() - answered,
            current: self.current,
            is_complete: self.is_complete(),
        }
    }

    /// Per-position answered/current flags, in session order.
    #[must_use]
    pub fn navigator(&self) -> Vec<QuestionSlot> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, q)| QuestionSlot {
                index,
                question_id: q.id(),
                answered: self.answers.contains(q.id()),
                current: index == self.current,
            })
            .collect()
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Record `option` as the answer to `question`, replacing any earlier one.
    ///
    /// The option is not checked against the question's option list.
    /// Returns `true` when a session question had no answer before; an id
    /// outside the session is stored but never reported as newly answered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        option: OptionId,
    ) -> Result<bool, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let fresh = self.answers.select(question, option);
        Ok(fresh && self.contains_question(question))
    }

    /// Drop the answer to `question`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished.
    pub fn clear_answer(&mut self, question: QuestionId) -> Result<Option<OptionId>, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        Ok(self.answers.clear(question))
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Step forward; stays on the last question.
    pub fn go_next(&mut self) -> usize {
        if !self.is_last() {
            self.current += 1;
        }
        self.current
    }

    /// Step back; stays on the first question.
    pub fn go_previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Move to `index` if it is in range. Returns whether the cursor moved there.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.questions.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    //
    // ─── COMPLETION ────────────────────────────────────────────────────────────
    //

    /// Mark the session finished. Later calls change nothing.
    ///
    /// Returns `true` only for the call that completed the session.
    pub fn complete(&mut self, completed_at: DateTime<Utc>) -> bool {
        if self.is_complete() {
            return false;
        }
        self.completed_at = Some(completed_at);
        true
    }

    /// Score of the finished session, recomputed on every call.
    #[must_use]
    pub fn summary(&self) -> Option<ResultSummary> {
        self.is_complete()
            .then(|| ResultSummary::score(&self.questions, &self.answers))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionOption;
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: u64, correct: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            vec![
                QuestionOption::new("a", "A"),
                QuestionOption::new("b", "B"),
                QuestionOption::new("c", "C"),
            ],
            OptionId::new(correct),
            None,
        )
        .unwrap()
    }

    fn session(n: u64) -> QuizSession {
        let questions = (1..=n).map(|id| question(id, "a")).collect();
        QuizSession::initialize(questions, false, fixed_now()).unwrap()
    }

    fn q(id: u64) -> QuestionId {
        QuestionId::new(id)
    }

    fn o(id: &str) -> OptionId {
        OptionId::new(id)
    }

    #[test]
    fn new_session_starts_at_first_question_with_no_answers() {
        let s = session(3);
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
        assert!(!s.is_complete());
        assert_eq!(s.current_question().id(), q(1));
        assert_eq!(s.started_at(), fixed_now());
    }

    #[test]
    fn empty_session_returns_error() {
        let err = QuizSession::initialize(Vec::new(), true, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn select_answer_is_last_write_wins() {
        let mut s = session(3);
        assert!(s.select_answer(q(1), o("a")).unwrap());
        assert!(s.select_answer(q(2), o("b")).unwrap());
        assert!(!s.select_answer(q(1), o("c")).unwrap());

        assert_eq!(s.answered_count(), 2);
        assert_eq!(s.answer_for(q(1)), Some(&o("c")));
        assert_eq!(s.answer_for(q(2)), Some(&o("b")));
    }

    #[test]
    fn options_are_not_validated() {
        let mut s = session(1);
        s.select_answer(q(1), o("zzz")).unwrap();
        assert_eq!(s.answer_for(q(1)), Some(&o("zzz")));
    }

    #[test]
    fn clear_then_select_reanswers() {
        let mut s = session(2);
        s.select_answer(q(2), o("a")).unwrap();
        assert_eq!(s.clear_answer(q(2)).unwrap(), Some(o("a")));
        assert_eq!(s.clear_answer(q(2)).unwrap(), None);
        assert!(!s.is_answered(q(2)));

        s.select_answer(q(2), o("b")).unwrap();
        assert_eq!(s.answer_for(q(2)), Some(&o("b")));
    }

    #[test]
    fn navigation_is_clamped() {
        let mut s = session(3);
        assert_eq!(s.go_previous(), 0);
        assert_eq!(s.go_next(), 1);
        assert_eq!(s.go_next(), 2);
        assert!(s.is_last());
        assert_eq!(s.go_next(), 2);
        assert_eq!(s.go_previous(), 1);
    }

    #[test]
    fn jump_to_ignores_out_of_range() {
        let mut s = session(3);
        assert!(s.jump_to(2));
        assert_eq!(s.current_index(), 2);
        assert!(!s.jump_to(3));
        assert!(!s.jump_to(usize::MAX));
        assert_eq!(s.current_index(), 2);
        assert!(s.jump_to(0));
        assert!(s.is_first());
    }

    #[test]
    fn single_question_session_cannot_move() {
        let mut s = session(1);
        assert!(s.is_first() && s.is_last());
        assert_eq!(s.go_next(), 0);
        assert_eq!(s.go_previous(), 0);
    }

    #[test]
    fn complete_is_idempotent_and_locks_answers() {
        let mut s = session(2);
        s.select_answer(q(1), o("a")).unwrap();
        let first = fixed_now() + chrono::Duration::minutes(5);

        assert!(s.complete(first));
        assert!(!s.complete(first + chrono::Duration::minutes(1)));
        assert_eq!(s.completed_at(), Some(first));

        assert!(matches!(
            s.select_answer(q(2), o("a")),
            Err(SessionError::Completed)
        ));
        assert!(matches!(s.clear_answer(q(1)), Err(SessionError::Completed)));
        assert_eq!(s.answered_count(), 1);

        // Reviewing answers after completion still works.
        assert_eq!(s.go_next(), 1);
    }

    #[test]
    fn summary_only_after_completion() {
        let mut s = QuizSession::initialize(
            vec![question(1, "a"), question(2, "b"), question(3, "c")],
            false,
            fixed_now(),
        )
        .unwrap();
        s.select_answer(q(1), o("a")).unwrap();
        s.select_answer(q(2), o("x")).unwrap();
        assert!(s.summary().is_none());

        s.complete(fixed_now());
        let summary = s.summary().unwrap();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.unanswered(), 1);
        assert_eq!(summary.percentage(), 33);
        assert_eq!(s.summary(), Some(summary));
    }

    #[test]
    fn progress_and_navigator_track_answers() {
        let mut s = session(3);
        s.select_answer(q(3), o("b")).unwrap();
        s.select_answer(q(77), o("b")).unwrap();
        s.jump_to(1);

        let progress = s.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.unanswered, 2);
        assert_eq!(progress.current, 1);

        let slots = s.navigator();
        assert_eq!(slots.len(), 3);
        assert!(slots[1].current && !slots[1].answered);
        assert!(slots[2].answered && !slots[2].current);
    }

    #[test]
    fn foreign_question_ids_do_not_inflate_answered_count() {
        let mut s = session(1);
        assert!(s.select_answer(q(1), o("a")).unwrap());
        assert!(!s.select_answer(q(99), o("a")).unwrap());

        assert!(!s.contains_question(q(99)));
        assert_eq!(s.answered_count(), 1);
        assert!(s.answered_count() <= s.total());
        assert_eq!(s.answered_count(), s.progress().answered);
    }

    #[test]
    fn shuffled_session_keeps_every_question_once() {
        let questions: Vec<_> = (1..=50).map(|id| question(id, "a")).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let s = QuizSession::initialize_with_rng(questions, true, fixed_now(), &mut rng).unwrap();

        let mut ids: Vec<u64> = s.questions().iter().map(|q| q.id().value()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
    }
}
