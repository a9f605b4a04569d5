use serde::{Deserialize, Serialize};

/// Per-graph statistics exposed to reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    /// Mean edge weight; `None` for an edgeless graph.
    pub mean_weight: Option<f64>,
    /// Edges per node; `None` for an empty graph.
    pub mean_degree: Option<f64>,
}
