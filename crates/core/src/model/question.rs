use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {question} lists option {option} more than once")]
    DuplicateOption {
        question: QuestionId,
        option: OptionId,
    },
}

//
// ─── OPTION ───────────────────────────────────────────────────────────────────
//

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single-choice question as used during a practice session.
///
/// The title is rich text (HTML rendered by the CMS) and is passed through
/// untouched. `correct_option` is not required to name one of `options`:
/// upstream data is sometimes inconsistent and such a question simply can
/// never be answered correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    title: String,
    options: Vec<QuestionOption>,
    correct_option: OptionId,
    explanation: Option<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateOption` if two options share an id.
    pub fn new(
        id: QuestionId,
        title: impl Into<String>,
        options: Vec<QuestionOption>,
        correct_option: OptionId,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(&option.id) {
                return Err(QuestionError::DuplicateOption {
                    question: id,
                    option: option.id.clone(),
                });
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            options,
            correct_option,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_id(&self) -> &OptionId {
        &self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&QuestionOption> {
        self.options.iter().find(|option| &option.id == id)
    }

    /// The option the correct id points at, if it points at any.
    #[must_use]
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.option(&self.correct_option)
    }

    #[must_use]
    pub fn is_correct(&self, selected: &OptionId) -> bool {
        selected == &self.correct_option
    }
}
