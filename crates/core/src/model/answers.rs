use serde::Serialize;
use std::collections::HashMap;

use crate::model::ids::{OptionId, QuestionId};

/// Selected option per question. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<QuestionId, OptionId>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `option` for `question`, replacing any earlier choice.
    ///
    /// Returns `true` when the question had no answer before.
    pub fn select(&mut self, question: QuestionId, option: OptionId) -> bool {
        self.0.insert(question, option).is_none()
    }

    /// Removes the answer for `question`, returning it if there was one.
    pub fn clear(&mut self, question: QuestionId) -> Option<OptionId> {
        self.0.remove(&question)
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<&OptionId> {
        self.0.get(&question)
    }

    #[must_use]
    pub fn contains(&self, question: QuestionId) -> bool {
        self.0.contains_key(&question)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &OptionId)> {
        self.0.iter().map(|(q, o)| (*q, o))
    }
}

impl FromIterator<(QuestionId, OptionId)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, OptionId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut answers = AnswerMap::new();
        assert!(answers.select(QuestionId::new(1), OptionId::new("a")));
        assert!(!answers.select(QuestionId::new(1), OptionId::new("c")));
        assert!(answers.select(QuestionId::new(2), OptionId::new("b")));

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(QuestionId::new(1)), Some(&OptionId::new("c")));
    }

    #[test]
    fn clear_then_reanswer() {
        let mut answers = AnswerMap::new();
        answers.select(QuestionId::new(4), OptionId::new("a"));
        assert_eq!(answers.clear(QuestionId::new(4)), Some(OptionId::new("a")));
        assert_eq!(answers.clear(QuestionId::new(4)), None);
        assert!(answers.is_empty());

        assert!(answers.select(QuestionId::new(4), OptionId::new("d")));
        assert_eq!(answers.get(QuestionId::new(4)), Some(&OptionId::new("d")));
    }
}
