//! Graph storage, normalization/pruning, and summary statistics.

pub mod affinity_graph;
pub mod metrics;
pub mod pruning;

pub use affinity_graph::{AffinityGraph, EdgeWeight, RawAffinity, RawGraph, WeightedGraph};
pub use metrics::{strongest_edges, summarize, Superlative};
pub use pruning::{normalize_and_prune, prune_isolated_nodes, NodePruneResult, NormalizeResult};
