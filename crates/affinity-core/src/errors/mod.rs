//! Error handling for the affinity engine.
//! One error enum per subsystem, `thiserror` only, aggregated by `AffinityError`.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod input_error;
pub mod matching_error;

pub use config_error::ConfigError;
pub use error_code::AffinityErrorCode;
pub use graph_error::GraphError;
pub use input_error::InputError;
pub use matching_error::MatchingError;

/// Top-level error for any engine operation.
#[derive(Debug, thiserror::Error)]
pub enum AffinityError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Matching error: {0}")]
    Matching(#[from] MatchingError),
}

impl AffinityErrorCode for AffinityError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Matching(e) => e.error_code(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type AffinityResult<T> = Result<T, AffinityError>;
