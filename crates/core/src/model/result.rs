use serde::Serialize;

use crate::model::{AnswerMap, OptionId, Question};

/// How a single question ended up after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Per-question line of a [`ResultSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub question: Question,
    pub user_answer: Option<OptionId>,
    pub correct_answer: OptionId,
    pub outcome: QuestionOutcome,
}

impl QuestionResult {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome == QuestionOutcome::Correct
    }

    #[must_use]
    pub fn was_answered(&self) -> bool {
        self.user_answer.is_some()
    }
}

/// Scoring breakdown of a finished attempt.
///
/// Always rebuilt from the questions and answers; nothing is cached.
/// `correct + incorrect + unanswered == total` holds for every value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    total: u32,
    correct: u32,
    incorrect: u32,
    unanswered: u32,
    percentage: u32,
    details: Vec<QuestionResult>,
}

impl ResultSummary {
    /// Scores `questions` in the given order against `answers`.
    ///
    /// A missing answer counts as unanswered, never as incorrect. An answer
    /// is correct only when it equals the designated option id exactly.
    /// Answers for questions outside `questions` are ignored.
    ///
    /// With no questions the summary is degenerate: every count and the
    /// percentage are zero.
    #[must_use]
    pub fn score(questions: &[Question], answers: &AnswerMap) -> Self {
        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut unanswered = 0_u32;

        let details: Vec<QuestionResult> = questions
            .iter()
            .map(|question| {
                let user_answer = answers.get(question.id()).cloned();
                let outcome = match &user_answer {
                    None => {
                        unanswered = unanswered.saturating_add(1);
                        QuestionOutcome::Unanswered
                    }
                    Some(selected) if question.is_correct(selected) => {
                        correct = correct.saturating_add(1);
                        QuestionOutcome::Correct
                    }
                    Some(_) => {
                        incorrect = incorrect.saturating_add(1);
                        QuestionOutcome::Incorrect
                    }
                };
                QuestionResult {
                    question: question.clone(),
                    user_answer,
                    correct_answer: question.correct_option_id().clone(),
                    outcome,
                }
            })
            .collect();

        let total = correct + incorrect + unanswered;

        Self {
            total,
            correct,
            incorrect,
            unanswered,
            percentage: round_percentage(correct, total),
            details,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn unanswered(&self) -> u32 {
        self.unanswered
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn details(&self) -> &[QuestionResult] {
        &self.details
    }

    #[must_use]
    pub fn passed(&self, threshold_percent: u32) -> bool {
        self.total > 0 && self.percentage >= threshold_percent
    }

    /// Incorrect and unanswered questions, in session order.
    #[must_use]
    pub fn missed_questions(&self) -> Vec<Question> {
        self.details
            .iter()
            .filter(|detail| !detail.is_correct())
            .map(|detail| detail.question.clone())
            .collect()
    }
}

/// `round(correct / total * 100)` with halves rounded up, in integers.
fn round_percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let total = u64::from(total);
    let rounded = (200 * correct + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}
