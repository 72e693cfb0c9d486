#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod loader;
pub mod session;

pub use error::{LoadError, SessionError};
pub use export::{ExportConfig, ExportTemplate, TranscriptExporter};
pub use loader::{AppInfo, QuizFile, load_quiz_file};
pub use session::{
    AnswerDisplay, NavState, OptionView, Presenter, QuestionInput, QuestionView, ResultCategory,
    ResultEntry, ResultsView, SessionController, SessionEvent, Transcript,
};
