//! Stable error codes for callers that branch on failure kind.

/// Every error enum implements this to expose a machine-readable code.
pub trait AffinityErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const DEGENERATE_GRAPH: &str = "DEGENERATE_GRAPH";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const ORACLE_FAILURE: &str = "ORACLE_FAILURE";
