//! # affinity-graph
//!
//! Turns poll votes into a weighted compatibility graph (`petgraph`), cleans
//! it, and groups people by repeatedly computing a maximum-weight matching
//! and contracting matched nodes into composite clusters.

pub mod aggregation;
pub mod contraction;
pub mod engine;
pub mod graph;
pub mod inversion;
pub mod matching;
pub mod spans;
pub mod stability;

pub use contraction::{ClusterEngine, ClusterForest, ClusterOutcome, StragglerResolution};
pub use engine::{AffinityEngine, CleanGraph, PipelineOutcome, PollSummary};
pub use graph::{AffinityGraph, RawAffinity, RawGraph, WeightedGraph};
pub use matching::{BlossomMatcher, MatchingAdapter, WeightedPairing};
pub use stability::StabilityReport;
