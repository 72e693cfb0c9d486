use thiserror::Error;

use crate::model::answer::Cursor;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("duplicate option key: {key}")]
    DuplicateOptionKey { key: String },
}

/// One selectable option of a choice question.
///
/// Keys identify the option within its question; labels are display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    key: String,
    label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// How a question is answered.
///
/// Options keep their configured order; a `Vec` rather than a map makes that
/// explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Choice { options: Vec<ChoiceOption> },
    OpenText { placeholder: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    kind: QuestionKind,
}

impl Question {
    /// Creates a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateOptionKey` if two options share a key.
    pub fn choice(
        text: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Result<Self, QuestionError> {
        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|o| o.key == option.key) {
                return Err(QuestionError::DuplicateOptionKey {
                    key: option.key.clone(),
                });
            }
        }

        Ok(Self {
            text: text.into(),
            kind: QuestionKind::Choice { options },
        })
    }

    /// Creates an open-ended question answered with free text.
    #[must_use]
    pub fn open_text(text: impl Into<String>, placeholder: Option<String>) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::OpenText { placeholder },
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_open_text(&self) -> bool {
        matches!(self.kind, QuestionKind::OpenText { .. })
    }

    /// Looks up the label of a choice option by key.
    ///
    /// Returns `None` for unknown keys and for open-text questions.
    #[must_use]
    pub fn option_label(&self, key: &str) -> Option<&str> {
        match &self.kind {
            QuestionKind::Choice { options } => options
                .iter()
                .find(|o| o.key == key)
                .map(|o| o.label.as_str()),
            QuestionKind::OpenText { .. } => None,
        }
    }
}

/// A named group of questions, rendered and themed as a unit.
///
/// Identity is the category's position in the question set; the name is
/// display text and may repeat across categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    questions: Vec<Question>,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The immutable, ordered sequence of categories a session walks through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    categories: Vec<Category>,
    total: usize,
}

impl QuestionSet {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        let total = categories.iter().map(Category::len).sum();
        Self { categories, total }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    #[must_use]
    pub fn question(&self, cursor: Cursor) -> Option<&Question> {
        self.categories
            .get(cursor.category)?
            .questions
            .get(cursor.question)
    }

    /// Fixed total question count across all categories.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_rejects_duplicate_keys() {
        let err = Question::choice(
            "Pick one",
            vec![
                ChoiceOption::new("A", "first"),
                ChoiceOption::new("B", "second"),
                ChoiceOption::new("A", "third"),
            ],
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::DuplicateOptionKey { key: "A".into() });
    }

    #[test]
    fn option_label_finds_key() {
        let question = Question::choice(
            "Pick one",
            vec![
                ChoiceOption::new("A", "first"),
                ChoiceOption::new("B", "second"),
            ],
        )
        .unwrap();

        assert_eq!(question.option_label("B"), Some("second"));
        assert_eq!(question.option_label("C"), None);
    }

    #[test]
    fn option_label_is_none_for_open_text() {
        let question = Question::open_text("Describe it", None);
        assert!(question.option_label("A").is_none());
        assert!(question.is_open_text());
    }

    #[test]
    fn question_set_counts_across_categories() {
        let set = QuestionSet::new(vec![
            Category::new(
                "One",
                vec![
                    Question::open_text("a", None),
                    Question::open_text("b", None),
                ],
            ),
            Category::new("Two", vec![Question::open_text("c", None)]),
        ]);

        assert_eq!(set.total_questions(), 3);
        assert_eq!(set.len(), 2);
        assert!(
            set.question(Cursor {
                category: 1,
                question: 0
            })
            .is_some()
        );
        assert!(
            set.question(Cursor {
                category: 1,
                question: 1
            })
            .is_none()
        );
    }
}
