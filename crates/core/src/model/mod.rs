mod answer;
mod question;

pub use answer::{AnswerStore, AnswerValue, Cursor};
pub use question::{Category, ChoiceOption, Question, QuestionError, QuestionKind, QuestionSet};
