use super::error_code::{self, AffinityErrorCode};

/// Failures of the maximum-weight matching oracle. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("matching oracle '{oracle}' failed: {reason}")]
    OracleFailed { oracle: String, reason: String },

    #[error("matching is not vertex-disjoint: vertex {vertex} appears in more than one pair")]
    NonDisjoint { vertex: usize },

    #[error("matching references vertex {vertex} outside the {vertex_count}-vertex graph")]
    UnknownVertex { vertex: usize, vertex_count: usize },

    #[error("matching pairs vertices {a} and {b} which share no edge")]
    NotAnEdge { a: usize, b: usize },
}

impl AffinityErrorCode for MatchingError {
    fn error_code(&self) -> &'static str {
        error_code::ORACLE_FAILURE
    }
}
