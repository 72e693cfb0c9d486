use serde::Serialize;

use crate::model::question::QuestionSet;

/// The (category, question) position currently presented to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub category: usize,
    pub question: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(category: usize, question: usize) -> Self {
        Self { category, question }
    }
}

/// A recorded answer: an option key for choice questions, free text for
/// open-ended ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerValue {
    Choice(String),
    Text(String),
}

impl AnswerValue {
    /// Blank answers are storable but count as unanswered.
    ///
    /// Only whitespace-only text is blank; a choice key never is.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Choice(_) => false,
            AnswerValue::Text(text) => text.trim().is_empty(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AnswerValue::Choice(key) => key,
            AnswerValue::Text(text) => text,
        }
    }
}

/// Per-session record of all answers given so far.
///
/// Slots mirror the question set exactly, one per question, so an entry can
/// never exist for a position outside the set and iteration order is the
/// set's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    slots: Vec<Vec<Option<AnswerValue>>>,
}

impl AnswerStore {
    /// Creates an empty store shaped like the given question set.
    #[must_use]
    pub fn for_set(set: &QuestionSet) -> Self {
        Self {
            slots: set
                .categories()
                .iter()
                .map(|category| vec![None; category.len()])
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, cursor: Cursor) -> Option<&AnswerValue> {
        self.slots
            .get(cursor.category)?
            .get(cursor.question)?
            .as_ref()
    }

    /// Stores a value, returning the previous one. Out-of-set positions are
    /// ignored and return `None`.
    pub fn put(&mut self, cursor: Cursor, value: AnswerValue) -> Option<AnswerValue> {
        let slot = self.slots.get_mut(cursor.category)?.get_mut(cursor.question)?;
        slot.replace(value)
    }

    pub fn clear(&mut self) {
        for category in &mut self.slots {
            category.fill(None);
        }
    }

    /// Ground-truth count of non-blank entries across the whole store.
    #[must_use]
    pub fn answered_len(&self) -> usize {
        self.slots
            .iter()
            .map(|category| Self::count_answered(category))
            .sum()
    }

    /// Non-blank entries within one category (0 for out-of-set indexes).
    #[must_use]
    pub fn answered_in_category(&self, category: usize) -> usize {
        self.slots.get(category).map_or(0, |c| Self::count_answered(c))
    }

    /// Highest non-blank question index within a category, the furthest
    /// point answered.
    #[must_use]
    pub fn max_answered_index(&self, category: usize) -> Option<usize> {
        self.slots.get(category)?.iter().enumerate().rev().find_map(
            |(index, slot)| match slot {
                Some(value) if !value.is_blank() => Some(index),
                _ => None,
            },
        )
    }

    fn count_answered(category: &[Option<AnswerValue>]) -> usize {
        category
            .iter()
            .filter(|slot| slot.as_ref().is_some_and(|v| !v.is_blank()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{Category, Question, QuestionSet};

    fn store_2_1() -> AnswerStore {
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
        AnswerStore::for_set(&set)
    }

    #[test]
    fn put_returns_previous_value() {
        let mut store = store_2_1();
        let at = Cursor::new(0, 1);

        assert_eq!(store.put(at, AnswerValue::Choice("A".into())), None);
        assert_eq!(
            store.put(at, AnswerValue::Choice("B".into())),
            Some(AnswerValue::Choice("A".into()))
        );
        assert_eq!(store.get(at), Some(&AnswerValue::Choice("B".into())));
    }

    #[test]
    fn put_ignores_out_of_set_positions() {
        let mut store = store_2_1();
        assert_eq!(store.put(Cursor::new(1, 1), AnswerValue::Text("x".into())), None);
        assert_eq!(store.put(Cursor::new(2, 0), AnswerValue::Text("x".into())), None);
        assert_eq!(store.answered_len(), 0);
    }

    #[test]
    fn blank_text_is_stored_but_not_counted() {
        let mut store = store_2_1();
        store.put(Cursor::new(0, 0), AnswerValue::Text("   ".into()));

        assert!(store.get(Cursor::new(0, 0)).is_some());
        assert_eq!(store.answered_len(), 0);
        assert_eq!(store.answered_in_category(0), 0);
        assert_eq!(store.max_answered_index(0), None);
    }

    #[test]
    fn max_answered_index_skips_blanks() {
        let mut store = store_2_1();
        store.put(Cursor::new(0, 0), AnswerValue::Choice("A".into()));
        store.put(Cursor::new(0, 1), AnswerValue::Text(" ".into()));

        assert_eq!(store.max_answered_index(0), Some(0));
        assert_eq!(store.answered_in_category(0), 1);
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut store = store_2_1();
        store.put(Cursor::new(0, 0), AnswerValue::Choice("A".into()));
        store.put(Cursor::new(1, 0), AnswerValue::Text("hi".into()));

        store.clear();

        assert_eq!(store.answered_len(), 0);
        assert!(store.get(Cursor::new(0, 0)).is_none());
        assert!(store.get(Cursor::new(1, 0)).is_none());
    }
}
