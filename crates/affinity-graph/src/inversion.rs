//! Weight inversion, so the maximum-weight oracle finds the worst pairing.

use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::graph::WeightedGraph;

/// Same topology with every weight replaced by `(max + epsilon) - weight`.
///
/// `max` is clamped at zero and `epsilon` must be positive, so every
/// inverted weight is strictly positive.
pub fn invert_weights(graph: &WeightedGraph, epsilon: f64) -> WeightedGraph {
    let max = graph
        .edges()
        .map(|(_, _, &w)| w)
        .fold(0.0_f64, f64::max);
    let ceiling = max + epsilon;

    let mut inverted = graph.clone();
    let ids: Vec<_> = graph.graph.edge_references().map(|e| e.id()).collect();
    for id in ids {
        if let Some(weight) = inverted.graph.edge_weight_mut(id) {
            *weight = ceiling - *weight;
        }
    }
    inverted
}
