mod controller;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{Presenter, SessionController, SessionEvent};
pub use view::{
    AnswerDisplay, NavState, OptionView, QuestionInput, QuestionView, ResultCategory, ResultEntry,
    ResultsView, Transcript,
};
