//! The maximum-weight matching oracle contract.

use crate::errors::MatchingError;

/// Undirected edge between two dense vertex indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// A graph flattened to dense indices `0..vertex_count`.
///
/// At most one edge per vertex pair and no self-edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingProblem {
    pub vertex_count: usize,
    pub edges: Vec<WeightedEdge>,
}

impl MatchingProblem {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        self.edges.push(WeightedEdge { a, b, weight });
    }
}

/// Maximum-weight matching capability.
///
/// Given an undirected graph with real edge weights, return vertex-disjoint
/// pairs whose total weight is maximal over all vertex-disjoint pairings.
/// The matching need not be perfect: unmatched vertices are allowed whenever
/// leaving them out does not lose weight. Ties between equal-weight optima
/// are broken in an implementation-defined way, and callers must not assume
/// repeated calls on the same problem return the same pairs.
pub trait IMatchingOracle {
    /// Human-readable oracle name used in errors and logs.
    fn name(&self) -> &str;

    /// Solve the problem, returning pairs of vertex indices.
    fn max_weight_matching(
        &self,
        problem: &MatchingProblem,
    ) -> Result<Vec<(usize, usize)>, MatchingError>;
}
