use rand::seq::SliceRandom;
use rand::{Rng, rng};
use std::collections::HashSet;

use quiz_core::model::Question;

/// Fixed question order for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    pub shuffled: bool,
    pub duplicates_dropped: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Decides the order questions are presented in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionPlanner {
    shuffle: bool,
}

impl SessionPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Plan using the thread-local RNG.
    pub fn plan(self, questions: impl IntoIterator<Item = Question>) -> SessionPlan {
        self.plan_with_rng(questions, &mut rng())
    }

    /// Plan with a caller-supplied RNG.
    ///
    /// Repeated question ids keep their first occurrence only, since answers
    /// are keyed by question id. Shuffling is a single uniform permutation.
    pub fn plan_with_rng<R: Rng + ?Sized>(
        self,
        questions: impl IntoIterator<Item = Question>,
        rng: &mut R,
    ) -> SessionPlan {
        let mut seen = HashSet::new();
        let mut duplicates_dropped = 0;
        let mut ordered: Vec<Question> = questions
            .into_iter()
            .filter(|q| {
                let fresh = seen.insert(q.id());
                if !fresh {
                    duplicates_dropped += 1;
                }
                fresh
            })
            .collect();

        if duplicates_dropped > 0 {
            log::warn!("dropped {duplicates_dropped} repeated questions from session");
        }

        if self.shuffle {
            ordered.as_mut_slice().shuffle(rng);
        }

        SessionPlan {
            questions: ordered,
            shuffled: self.shuffle,
            duplicates_dropped,
        }
    }
}
