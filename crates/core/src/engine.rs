use serde::Serialize;
use thiserror::Error;

use crate::model::{AnswerStore, AnswerValue, Category, Cursor, Question, QuestionSet};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("question set has no categories")]
    EmptyQuestionSet,

    #[error("category {index} has no questions")]
    EmptyCategory { index: usize },
}

//
// ─── SNAPSHOTS ─────────────────────────────────────────────────────────────────
//

/// Result of a forward navigation step.
///
/// `Finished` is a transient signal: the cursor stays on the last question
/// and repeated calls keep returning `Finished`. Whether to show results is
/// the caller's decision, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Finished,
    /// The session has not been started; nothing happened.
    Inactive,
}

/// Snapshot of navigation affordances for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub is_first_question: bool,
    pub is_last_question: bool,
    pub cursor: Cursor,
    pub has_current_answer: bool,
    pub started: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Completed,
    Current,
    Passed,
    Pending,
}

/// Per-category progress row.
///
/// `display_cursor` is the question index a progress bar should point at:
/// the question being viewed for `Current` (viewing progress, answered or
/// not), the furthest answered question for `Passed` (0 if none), the last
/// question for `Completed`, 0 for `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub name: String,
    pub status: CategoryStatus,
    pub answered: usize,
    pub total: usize,
    pub percent: f32,
    pub display_cursor: usize,
}

/// 1-based running position of the current question across all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionCounter {
    pub current: usize,
    pub total: usize,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// State machine over an immutable question set: cursor, answers, and the
/// derived progress views.
///
/// Operations that need an active session are uniform, well-defined no-ops
/// while the session is inactive: accessors return `None`, mutators return a
/// neutral sentinel. The one hard failure is [`QuizEngine::start`] on a
/// malformed set.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizEngine {
    set: QuestionSet,
    cursor: Cursor,
    answers: AnswerStore,
    answered: usize,
    started: bool,
}

impl QuizEngine {
    #[must_use]
    pub fn new(set: QuestionSet) -> Self {
        let answers = AnswerStore::for_set(&set);
        Self {
            set,
            cursor: Cursor::default(),
            answers,
            answered: 0,
            started: false,
        }
    }

    /// Activates the session with the cursor at the first question.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyQuestionSet` when the set has no
    /// categories and `EngineError::EmptyCategory` when any category has no
    /// questions. Both indicate a malformed configuration the session cannot
    /// recover from.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.set.is_empty() {
            return Err(EngineError::EmptyQuestionSet);
        }
        if let Some(index) = self.set.categories().iter().position(Category::is_empty) {
            return Err(EngineError::EmptyCategory { index });
        }

        self.started = true;
        self.cursor = Cursor::default();
        Ok(())
    }

    /// Returns the session to pristine: no answers, cursor at the first
    /// question, inactive until [`QuizEngine::start`] is called again.
    pub fn restart(&mut self) {
        self.started = false;
        self.cursor = Cursor::default();
        self.answered = 0;
        self.answers.clear();
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────
    //

    /// Records an option key for the current question, overwriting any
    /// previous answer.
    ///
    /// Returns `Some(previously_answered)`, or `None` while inactive. The
    /// answered count increments only when the position was previously
    /// unanswered; re-selecting (same key or a different one) leaves it
    /// unchanged.
    pub fn select_option(&mut self, key: impl Into<String>) -> Option<bool> {
        if !self.started {
            return None;
        }
        Some(self.store_answer(AnswerValue::Choice(key.into())))
    }

    /// Records free text for the current question.
    ///
    /// Whitespace-only text is stored but counts as unanswered: the answered
    /// count increments on unanswered→non-blank, decrements on
    /// non-blank→blank, and is untouched when one non-blank text replaces
    /// another. Returns `Some(previously_answered)`, or `None` while
    /// inactive.
    pub fn set_text_answer(&mut self, text: impl Into<String>) -> Option<bool> {
        if !self.started {
            return None;
        }
        Some(self.store_answer(AnswerValue::Text(text.into())))
    }

    // The count delta is derived from the blankness of the previous and new
    // values, never from entry presence, so `answered` always equals
    // `answers.answered_len()`.
    fn store_answer(&mut self, value: AnswerValue) -> bool {
        let gains = !value.is_blank();
        let previous = self.answers.put(self.cursor, value);
        let had = previous.is_some_and(|v| !v.is_blank());

        match (had, gains) {
            (false, true) => self.answered += 1,
            (true, false) => self.answered -= 1,
            _ => {}
        }
        had
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────
    //

    /// Moves the cursor forward one question, crossing into the next
    /// category when the current one is exhausted.
    ///
    /// At the last question of the last category the cursor stays put and
    /// `Advance::Finished` is returned, repeatably.
    pub fn advance(&mut self) -> Advance {
        if !self.started {
            return Advance::Inactive;
        }

        let in_category = self
            .set
            .category(self.cursor.category)
            .map_or(0, Category::len);

        if self.cursor.question + 1 < in_category {
            self.cursor.question += 1;
            Advance::Moved
        } else if self.cursor.category + 1 < self.set.len() {
            self.cursor.category += 1;
            self.cursor.question = 0;
            Advance::Moved
        } else {
            Advance::Finished
        }
    }

    /// Moves the cursor back one question, crossing into the previous
    /// category's last question at a category boundary.
    ///
    /// Returns `true` when the cursor moved; `false` at the very first
    /// question and while inactive.
    pub fn retreat(&mut self) -> bool {
        if !self.started {
            return false;
        }

        if self.cursor.question > 0 {
            self.cursor.question -= 1;
            true
        } else if self.cursor.category > 0 {
            self.cursor.category -= 1;
            self.cursor.question = self
                .set
                .category(self.cursor.category)
                .map_or(0, |c| c.len().saturating_sub(1));
            true
        } else {
            false
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────
    //

    /// `None` while the session is inactive, like the other accessors.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if !self.started {
            return None;
        }
        self.set.question(self.cursor)
    }

    #[must_use]
    pub fn current_category(&self) -> Option<&Category> {
        if !self.started {
            return None;
        }
        self.set.category(self.cursor.category)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerValue> {
        if !self.started {
            return None;
        }
        self.answers.get(self.cursor)
    }

    #[must_use]
    pub fn question_set(&self) -> &QuestionSet {
        &self.set
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered
    }

    //
    // ─── DERIVED VIEWS ─────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn state(&self) -> EngineState {
        let last_category = self.set.len().checked_sub(1);
        let is_last_question = last_category.is_some_and(|category| {
            self.cursor.category == category
                && self
                    .set
                    .category(category)
                    .is_some_and(|c| self.cursor.question + 1 == c.len())
        });

        EngineState {
            is_first_question: self.cursor == Cursor::default(),
            is_last_question,
            cursor: self.cursor,
            has_current_answer: self.answers.get(self.cursor).is_some(),
            started: self.started,
        }
    }

    /// Per-category progress rows in set order.
    ///
    /// Status priority: completed, then current, then passed, then pending.
    #[must_use]
    pub fn progress(&self) -> Vec<CategoryProgress> {
        self.set
            .categories()
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let answered = self.answers.answered_in_category(index);
                let total = category.len();
                let percent = if total == 0 {
                    0.0
                } else {
                    answered as f32 / total as f32 * 100.0
                };

                let (status, display_cursor) = if answered == total {
                    (CategoryStatus::Completed, total.saturating_sub(1))
                } else if index == self.cursor.category {
                    (CategoryStatus::Current, self.cursor.question)
                } else if index < self.cursor.category {
                    (
                        CategoryStatus::Passed,
                        self.answers.max_answered_index(index).unwrap_or(0),
                    )
                } else {
                    (CategoryStatus::Pending, 0)
                };

                CategoryProgress {
                    name: category.name().to_string(),
                    status,
                    answered,
                    total,
                    percent,
                    display_cursor,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn counter(&self) -> QuestionCounter {
        let before: usize = self
            .set
            .categories()
            .iter()
            .take(self.cursor.category)
            .map(Category::len)
            .sum();

        QuestionCounter {
            current: before + self.cursor.question + 1,
            total: self.set.total_questions(),
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.answered == self.set.total_questions()
    }

    /// Overall completion, 0.0 for an empty set.
    #[must_use]
    pub fn completion_percentage(&self) -> f32 {
        let total = self.set.total_questions();
        if total == 0 {
            return 0.0;
        }
        self.answered as f32 / total as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChoiceOption;

    fn choice(text: &str) -> Question {
        Question::choice(
            text,
            vec![
                ChoiceOption::new("A", "option a"),
                ChoiceOption::new("B", "option b"),
            ],
        )
        .unwrap()
    }

    /// Two categories, sizes [2, 1].
    fn engine_2_1() -> QuizEngine {
        QuizEngine::new(QuestionSet::new(vec![
            Category::new("First", vec![choice("q0"), choice("q1")]),
            Category::new("Second", vec![choice("q2")]),
        ]))
    }

    fn started_2_1() -> QuizEngine {
        let mut engine = engine_2_1();
        engine.start().unwrap();
        engine
    }

    #[test]
    fn start_rejects_empty_set() {
        let mut engine = QuizEngine::new(QuestionSet::new(Vec::new()));
        assert_eq!(engine.start(), Err(EngineError::EmptyQuestionSet));
        assert!(!engine.is_started());
    }

    #[test]
    fn start_rejects_empty_category() {
        let mut engine = QuizEngine::new(QuestionSet::new(vec![
            Category::new("Full", vec![choice("q")]),
            Category::new("Hollow", Vec::new()),
        ]));
        assert_eq!(engine.start(), Err(EngineError::EmptyCategory { index: 1 }));
    }

    #[test]
    fn operations_are_neutral_before_start() {
        let mut engine = engine_2_1();

        assert_eq!(engine.select_option("A"), None);
        assert_eq!(engine.set_text_answer("hello"), None);
        assert_eq!(engine.advance(), Advance::Inactive);
        assert!(!engine.retreat());
        assert!(engine.current_question().is_none());
        assert!(engine.current_category().is_none());
        assert!(engine.current_answer().is_none());
        assert_eq!(engine.answered_count(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds_under_navigation() {
        let mut engine = started_2_1();

        for _ in 0..10 {
            engine.advance();
        }
        for _ in 0..10 {
            engine.retreat();
        }
        engine.advance();
        engine.advance();
        engine.retreat();
        engine.advance();

        let cursor = engine.state().cursor;
        assert!(cursor.category < engine.question_set().len());
        assert!(cursor.question < engine.question_set().category(cursor.category).unwrap().len());
    }

    #[test]
    fn advance_crosses_category_boundary() {
        let mut engine = started_2_1();

        assert_eq!(engine.advance(), Advance::Moved);
        assert_eq!(engine.state().cursor, Cursor::new(0, 1));
        assert_eq!(engine.advance(), Advance::Moved);
        assert_eq!(engine.state().cursor, Cursor::new(1, 0));
    }

    #[test]
    fn retreat_crosses_back_to_previous_category_last_question() {
        let mut engine = started_2_1();
        engine.advance();
        engine.advance();

        assert!(engine.retreat());
        assert_eq!(engine.state().cursor, Cursor::new(0, 1));
    }

    #[test]
    fn retreat_is_noop_at_origin() {
        let mut engine = started_2_1();

        assert!(!engine.retreat());
        assert_eq!(engine.state().cursor, Cursor::new(0, 0));
    }

    #[test]
    fn advance_signals_finished_repeatedly_without_moving() {
        let mut engine = QuizEngine::new(QuestionSet::new(vec![Category::new(
            "Only",
            vec![choice("q")],
        )]));
        engine.start().unwrap();

        for _ in 0..3 {
            assert_eq!(engine.advance(), Advance::Finished);
            assert_eq!(engine.state().cursor, Cursor::new(0, 0));
        }
    }

    #[test]
    fn counter_tracks_each_navigation_step() {
        let mut engine = started_2_1();
        assert_eq!(engine.counter().current, 1);

        assert_eq!(engine.advance(), Advance::Moved);
        assert_eq!(engine.counter().current, 2);
        assert_eq!(engine.advance(), Advance::Moved);
        assert_eq!(engine.counter().current, 3);
        assert_eq!(engine.advance(), Advance::Finished);
        assert_eq!(engine.counter().current, 3);

        assert!(engine.retreat());
        assert_eq!(engine.counter().current, 2);
        assert_eq!(engine.counter().total, 3);
    }

    #[test]
    fn select_option_counts_only_fresh_answers() {
        let mut engine = started_2_1();

        assert_eq!(engine.select_option("A"), Some(false));
        assert_eq!(engine.answered_count(), 1);
        // Same key again, then a different key: presence did not change.
        assert_eq!(engine.select_option("A"), Some(true));
        assert_eq!(engine.select_option("B"), Some(true));
        assert_eq!(engine.answered_count(), 1);
        assert_eq!(
            engine.current_answer(),
            Some(&AnswerValue::Choice("B".into()))
        );
    }

    #[test]
    fn text_answer_blank_transitions_drive_the_count() {
        let mut engine = started_2_1();

        assert_eq!(engine.set_text_answer("  "), Some(false));
        assert_eq!(engine.answered_count(), 0);
        assert_eq!(engine.set_text_answer("hello"), Some(false));
        assert_eq!(engine.answered_count(), 1);
        assert_eq!(engine.set_text_answer("other"), Some(true));
        assert_eq!(engine.answered_count(), 1);
        assert_eq!(engine.set_text_answer(""), Some(true));
        assert_eq!(engine.answered_count(), 0);

        assert_eq!(engine.answered_count(), engine.answers().answered_len());
    }

    #[test]
    fn restart_returns_to_pristine() {
        let mut engine = started_2_1();
        engine.select_option("A");
        engine.advance();
        engine.select_option("B");

        engine.restart();

        assert!(!engine.is_started());
        assert_eq!(engine.answered_count(), 0);
        assert_eq!(engine.answers().answered_len(), 0);
        assert_eq!(engine.state().cursor, Cursor::new(0, 0));

        let progress = engine.progress();
        assert_eq!(progress[0].status, CategoryStatus::Current);
        assert_eq!(progress[1].status, CategoryStatus::Pending);
        assert!(progress.iter().all(|row| row.answered == 0));
    }

    #[test]
    fn scenario_two_categories_walked_to_the_end() {
        let mut engine = started_2_1();

        engine.select_option("A");
        assert_eq!(engine.advance(), Advance::Moved);
        engine.select_option("B");
        assert_eq!(engine.advance(), Advance::Moved);

        assert_eq!(engine.state().cursor, Cursor::new(1, 0));
        assert_eq!(
            engine.counter(),
            QuestionCounter {
                current: 3,
                total: 3
            }
        );

        let progress = engine.progress();
        assert_eq!(progress[0].status, CategoryStatus::Completed);
        assert_eq!(progress[0].answered, 2);
        assert_eq!(progress[0].total, 2);
        assert_eq!(progress[1].status, CategoryStatus::Current);
        assert_eq!(progress[1].answered, 0);
        assert_eq!(progress[1].display_cursor, 0);
    }

    #[test]
    fn passed_category_reports_furthest_answered_question() {
        let mut engine = QuizEngine::new(QuestionSet::new(vec![
            Category::new("First", vec![choice("q0"), choice("q1"), choice("q2")]),
            Category::new("Second", vec![choice("q3")]),
        ]));
        engine.start().unwrap();

        engine.advance();
        engine.select_option("A");
        engine.advance();
        engine.advance();

        let progress = engine.progress();
        assert_eq!(progress[0].status, CategoryStatus::Passed);
        assert_eq!(progress[0].display_cursor, 1);
        assert_eq!(progress[1].status, CategoryStatus::Current);
    }

    #[test]
    fn passed_category_with_no_answers_displays_zero() {
        let mut engine = started_2_1();
        engine.advance();
        engine.advance();

        let progress = engine.progress();
        assert_eq!(progress[0].status, CategoryStatus::Passed);
        assert_eq!(progress[0].display_cursor, 0);
    }

    #[test]
    fn current_category_display_cursor_reflects_viewing_position() {
        let mut engine = started_2_1();
        engine.advance();

        // Second question viewed but nothing answered yet.
        let progress = engine.progress();
        assert_eq!(progress[0].status, CategoryStatus::Current);
        assert_eq!(progress[0].display_cursor, 1);
    }

    #[test]
    fn completion_tracks_the_whole_store() {
        let mut engine = started_2_1();
        assert!(!engine.is_completed());
        assert_eq!(engine.completion_percentage(), 0.0);

        engine.select_option("A");
        engine.advance();
        engine.select_option("B");
        engine.advance();
        engine.select_option("A");

        assert!(engine.is_completed());
        assert_eq!(engine.completion_percentage(), 100.0);
    }

    #[test]
    fn completion_percentage_guards_empty_set() {
        let engine = QuizEngine::new(QuestionSet::new(Vec::new()));
        assert_eq!(engine.completion_percentage(), 0.0);
        assert!(engine.is_completed());
    }

    #[test]
    fn state_snapshot_flags_first_and_last() {
        let mut engine = started_2_1();

        let state = engine.state();
        assert!(state.is_first_question);
        assert!(!state.is_last_question);
        assert!(!state.has_current_answer);
        assert!(state.started);

        engine.select_option("A");
        engine.advance();
        engine.advance();

        let state = engine.state();
        assert!(!state.is_first_question);
        assert!(state.is_last_question);
    }
}
