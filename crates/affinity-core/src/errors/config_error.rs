//! Configuration errors.

use super::error_code::{self, AffinityErrorCode};

/// Errors raised while loading or validating configuration and poll matrices.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("poll '{poll}' matrix is not square: {answers} answers, row {row} has {len} entries")]
    MatrixNotSquare {
        poll: String,
        answers: usize,
        row: usize,
        len: usize,
    },

    #[error("poll '{poll}' lists answer '{answer}' more than once")]
    DuplicateAnswer { poll: String, answer: String },

    #[error("poll '{poll}' has no answers")]
    EmptyPoll { poll: String },
}

impl AffinityErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
