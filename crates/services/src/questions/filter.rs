/// Selection sent to the question endpoint.
///
/// Every field is optional; an empty filter asks the CMS for its default
/// practice pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QuestionFilter {
    pub quiz_id: Option<u64>,
    pub course_id: Option<u64>,
    pub lesson_id: Option<u64>,
    pub category_id: Option<u64>,
    pub difficulty_id: Option<u64>,
}

impl QuestionFilter {
    #[must_use]
    pub fn for_quiz(quiz_id: u64) -> Self {
        Self {
            quiz_id: Some(quiz_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_course(mut self, course_id: u64) -> Self {
        self.course_id = Some(course_id);
        self
    }

    #[must_use]
    pub fn with_lesson(mut self, lesson_id: u64) -> Self {
        self.lesson_id = Some(lesson_id);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty_id: u64) -> Self {
        self.difficulty_id = Some(difficulty_id);
        self
    }

    /// Query parameters for the set fields, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("quiz_id", self.quiz_id),
            ("course_id", self.course_id),
            ("lesson_id", self.lesson_id),
            ("category_id", self.category_id),
            ("difficulty_id", self.difficulty_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect()
    }
}
