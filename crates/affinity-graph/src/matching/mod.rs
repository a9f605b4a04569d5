//! Matching adapter: flattens a weighted graph for an `IMatchingOracle` and
//! checks what comes back.

mod blossom;

pub use blossom::BlossomMatcher;

use std::collections::{HashMap, HashSet};

use affinity_core::errors::{AffinityResult, MatchingError};
use affinity_core::traits::{IMatchingOracle, MatchingProblem};
use affinity_core::{Matching, NodeKey, Pairing};
use serde::Serialize;

use crate::graph::WeightedGraph;

/// A pairing together with the weight of the edge it uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPairing {
    pub pairing: Pairing,
    pub weight: f64,
}

/// Runs the oracle against affinity graphs.
///
/// The graph is passed as-is: one vertex per node in node order, one edge per
/// graph edge with its weight. The oracle result is rejected if it names an
/// unknown vertex, a non-edge, or a vertex twice.
#[derive(Clone, Copy)]
pub struct MatchingAdapter<'a> {
    oracle: &'a dyn IMatchingOracle,
}

impl<'a> MatchingAdapter<'a> {
    pub fn new(oracle: &'a dyn IMatchingOracle) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Compute a maximum-weight matching of `graph`.
    pub fn pair(&self, graph: &WeightedGraph) -> AffinityResult<Matching> {
        let nodes: Vec<&NodeKey> = graph.nodes().collect();
        let position: HashMap<&NodeKey, usize> =
            nodes.iter().enumerate().map(|(i, &key)| (key, i)).collect();

        let mut problem = MatchingProblem::new(nodes.len());
        for (a, b, &weight) in graph.edges() {
            problem.add_edge(position[a], position[b], weight);
        }

        let pairs = self.oracle.max_weight_matching(&problem)?;

        let mut seen = HashSet::new();
        let mut matching = Matching::new();
        for (a, b) in pairs {
            for vertex in [a, b] {
                if vertex >= nodes.len() {
                    return Err(MatchingError::UnknownVertex {
                        vertex,
                        vertex_count: nodes.len(),
                    }
                    .into());
                }
                if !seen.insert(vertex) {
                    return Err(MatchingError::NonDisjoint { vertex }.into());
                }
            }
            if graph.edge(nodes[a], nodes[b]).is_none() {
                return Err(MatchingError::NotAnEdge { a, b }.into());
            }
            matching.insert(Pairing::new(nodes[a].clone(), nodes[b].clone()));
        }

        tracing::debug!(
            oracle = self.oracle.name(),
            nodes = nodes.len(),
            edges = problem.edges.len(),
            pairings = matching.len(),
            "matching computed"
        );
        Ok(matching)
    }
}

impl std::fmt::Debug for MatchingAdapter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingAdapter")
            .field("oracle", &self.oracle.name())
            .finish()
    }
}

/// Attach each pairing's edge weight, in pairing order.
pub fn weighted_pairings(graph: &WeightedGraph, matching: &Matching) -> Vec<WeightedPairing> {
    matching
        .iter()
        .map(|pairing| WeightedPairing {
            pairing: pairing.clone(),
            weight: graph
                .edge(pairing.first(), pairing.second())
                .copied()
                .unwrap_or_default(),
        })
        .collect()
}

/// Total weight of the matched edges.
pub fn matching_weight(graph: &WeightedGraph, matching: &Matching) -> f64 {
    weighted_pairings(graph, matching)
        .iter()
        .map(|p| p.weight)
        .sum()
}

/// Nodes left out of `matching`, in node order.
pub fn find_stragglers(graph: &WeightedGraph, matching: &Matching) -> Vec<NodeKey> {
    let matched = matching.matched_nodes();
    graph
        .nodes()
        .filter(|node| !matched.contains(node))
        .cloned()
        .collect()
}
