//! Normalize raw edges, drop edges below the shared-poll threshold, and
//! remove nodes left without edges.

use affinity_core::constants::COMMON_BONUS_DIVISOR;
use affinity_core::errors::{AffinityResult, GraphError};
use affinity_core::NodeKey;

use super::affinity_graph::{RawGraph, WeightedGraph};

/// Result of edge normalization and pruning.
#[derive(Debug, Clone)]
pub struct NormalizeResult {
    /// Every raw node, surviving edges only, normalized weights.
    pub graph: WeightedGraph,
    /// Number of edges dropped for `common < min_polls`.
    pub edges_pruned: usize,
}

/// Result of isolated-node removal.
#[derive(Debug, Clone)]
pub struct NodePruneResult {
    pub graph: WeightedGraph,
    /// Removed nodes, in node order.
    pub removed: Vec<NodeKey>,
}

/// Normalized weight of a raw edge: mean score per shared poll plus a
/// `common / 100` bonus.
pub fn normalized_weight(weight: f64, common: u32) -> f64 {
    let common = f64::from(common);
    weight / common + common / COMMON_BONUS_DIVISOR
}

/// Convert the raw graph into a normalized one, keeping only edges with
/// `common >= min_polls`.
///
/// Fails fast with `GraphError::DegenerateEdge` if any edge has `common == 0`.
pub fn normalize_and_prune(raw: &RawGraph, min_polls: u32) -> AffinityResult<NormalizeResult> {
    let mut graph = WeightedGraph::new();
    for node in raw.nodes() {
        graph.ensure_node(node);
    }

    let mut edges_pruned = 0;
    for (a, b, edge) in raw.edges() {
        if edge.common == 0 {
            return Err(GraphError::DegenerateEdge {
                a: a.to_string(),
                b: b.to_string(),
            }
            .into());
        }
        if edge.common >= min_polls {
            graph.set_edge(a, b, normalized_weight(edge.weight, edge.common));
        } else {
            edges_pruned += 1;
        }
    }

    tracing::debug!(
        kept = graph.edge_count(),
        pruned = edges_pruned,
        min_polls,
        "edges normalized"
    );

    Ok(NormalizeResult {
        graph,
        edges_pruned,
    })
}

/// Remove every node that is not an endpoint of any edge.
pub fn prune_isolated_nodes(graph: &WeightedGraph) -> NodePruneResult {
    let mut pruned = graph.clone();
    let removed = graph.isolated_nodes();
    for node in &removed {
        pruned.remove_node(node);
    }
    NodePruneResult {
        graph: pruned,
        removed,
    }
}
