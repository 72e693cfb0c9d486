#![forbid(unsafe_code)]

pub mod engine;
pub mod model;

pub use engine::{
    Advance, CategoryProgress, CategoryStatus, EngineError, EngineState, QuestionCounter,
    QuizEngine,
};
pub use model::{
    AnswerStore, AnswerValue, Category, ChoiceOption, Cursor, Question, QuestionError,
    QuestionKind, QuestionSet,
};
