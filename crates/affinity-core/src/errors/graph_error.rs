use super::error_code::{self, AffinityErrorCode};

/// Graph invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge with no shared polls reached normalization.
    #[error("degenerate edge {a} -- {b}: common poll count is zero")]
    DegenerateEdge { a: String, b: String },

    #[error("node not in graph: {node}")]
    UnknownNode { node: String },
}

impl AffinityErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateEdge { .. } => error_code::DEGENERATE_GRAPH,
            Self::UnknownNode { .. } => error_code::GRAPH_ERROR,
        }
    }
}
