//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::engine::EngineError;
use quiz_core::model::QuestionError;

/// Errors emitted while loading a quiz configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read quiz file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("option {key:?} has a non-string label")]
    OptionLabel { key: String },
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}
