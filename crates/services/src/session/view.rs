//! Presentation-agnostic view-models.
//!
//! These are plain data snapshots handed to the presentation layer: no
//! engine references, no pre-formatted strings beyond the configured
//! display text. The presenter decides layout, colors, and wording.

use quiz_core::engine::{EngineState, QuestionCounter, QuizEngine};
use quiz_core::model::{AnswerStore, AnswerValue, Cursor, QuestionKind, QuestionSet};

/// One selectable option as the presenter should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// Input affordance of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionInput {
    Options(Vec<OptionView>),
    Text {
        placeholder: Option<String>,
        current: Option<String>,
    },
}

/// Snapshot of the question currently presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub category_name: String,
    pub category_index: usize,
    pub text: String,
    pub input: QuestionInput,
    pub counter: QuestionCounter,
}

impl QuestionView {
    /// Builds the view for the engine's current position, `None` while the
    /// session is inactive.
    #[must_use]
    pub fn from_engine(engine: &QuizEngine) -> Option<Self> {
        let question = engine.current_question()?;
        let category = engine.current_category()?;
        let answer = engine.current_answer();

        let input = match question.kind() {
            QuestionKind::Choice { options } => {
                let selected_key = match answer {
                    Some(AnswerValue::Choice(key)) => Some(key.as_str()),
                    _ => None,
                };
                QuestionInput::Options(
                    options
                        .iter()
                        .map(|option| OptionView {
                            key: option.key().to_string(),
                            label: option.label().to_string(),
                            selected: selected_key == Some(option.key()),
                        })
                        .collect(),
                )
            }
            QuestionKind::OpenText { placeholder } => QuestionInput::Text {
                placeholder: placeholder.clone(),
                current: match answer {
                    Some(AnswerValue::Text(text)) => Some(text.clone()),
                    _ => None,
                },
            },
        };

        Some(Self {
            category_name: category.name().to_string(),
            category_index: engine.state().cursor.category,
            text: question.text().to_string(),
            input,
            counter: engine.counter(),
        })
    }
}

/// Navigation-button state derived from the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub is_first: bool,
    pub is_last: bool,
    pub has_answer: bool,
}

impl From<EngineState> for NavState {
    fn from(state: EngineState) -> Self {
        Self {
            is_first: state.is_first_question,
            is_last: state.is_last_question,
            has_answer: state.has_current_answer,
        }
    }
}

/// How one answered (or unanswered) question shows up in the results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDisplay {
    Choice { key: String, label: String },
    Text(String),
    Unanswered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub question: String,
    pub answer: AnswerDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCategory {
    pub name: String,
    pub entries: Vec<ResultEntry>,
}

/// Snapshot of the whole session for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub answered: usize,
    pub total: usize,
    pub percent: f32,
    pub categories: Vec<ResultCategory>,
}

impl ResultsView {
    #[must_use]
    pub fn build(set: &QuestionSet, answers: &AnswerStore) -> Self {
        let categories = set
            .categories()
            .iter()
            .enumerate()
            .map(|(category_index, category)| ResultCategory {
                name: category.name().to_string(),
                entries: category
                    .questions()
                    .iter()
                    .enumerate()
                    .map(|(question_index, question)| {
                        let answer = answers.get(Cursor::new(category_index, question_index));
                        let answer = match answer {
                            Some(AnswerValue::Choice(key)) => AnswerDisplay::Choice {
                                key: key.clone(),
                                label: question
                                    .option_label(key)
                                    .unwrap_or(key.as_str())
                                    .to_string(),
                            },
                            Some(AnswerValue::Text(text)) if !text.trim().is_empty() => {
                                AnswerDisplay::Text(text.trim().to_string())
                            }
                            _ => AnswerDisplay::Unanswered,
                        };
                        ResultEntry {
                            question: question.text().to_string(),
                            answer,
                        }
                    })
                    .collect(),
            })
            .collect();

        let answered = answers.answered_len();
        let total = set.total_questions();
        let percent = if total == 0 {
            0.0
        } else {
            answered as f32 / total as f32 * 100.0
        };

        Self {
            answered,
            total,
            percent,
            categories,
        }
    }
}

/// A rendered transcript ready for the presenter to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub filename: String,
    pub text: String,
}
