//! Summary statistics and superlatives for reporting.

use affinity_core::{GraphSummary, NodeKey};

use super::affinity_graph::{AffinityGraph, EdgeWeight, WeightedGraph};

/// Compute node/edge counts, mean weight, and mean degree (edges per node).
pub fn summarize<E: EdgeWeight>(graph: &AffinityGraph<E>) -> GraphSummary {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let mean_weight = (edge_count > 0).then(|| graph.total_weight() / edge_count as f64);
    let mean_degree = (node_count > 0).then(|| edge_count as f64 / node_count as f64);

    GraphSummary {
        node_count,
        edge_count,
        mean_weight,
        mean_degree,
    }
}

/// The heaviest edge weight and every edge that attains it.
#[derive(Debug, Clone, PartialEq)]
pub struct Superlative {
    pub weight: f64,
    pub edges: Vec<(NodeKey, NodeKey)>,
}

/// Find the strongest edge(s). Only strictly positive weights qualify.
pub fn strongest_edges(graph: &WeightedGraph) -> Option<Superlative> {
    let mut best: Option<Superlative> = None;

    for (a, b, &weight) in graph.edges() {
        if weight <= 0.0 {
            continue;
        }
        match best.as_mut() {
            Some(current) if weight == current.weight => {
                current.edges.push((a.clone(), b.clone()));
            }
            Some(current) if weight < current.weight => {}
            _ => {
                best = Some(Superlative {
                    weight,
                    edges: vec![(a.clone(), b.clone())],
                });
            }
        }
    }

    best
}
