//! Event payload types.

use crate::models::{GraphSummary, NodeKey};

/// Which graph a summary describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphStage {
    /// Users added, no edges yet.
    Initial,
    /// Raw graph after one poll has been aggregated.
    Aggregated,
    /// Normalized graph after edge and node pruning.
    Pruned,
    /// Graph after one contraction round.
    Contracted,
}

impl GraphStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Aggregated => "aggregated",
            Self::Pruned => "pruned",
            Self::Contracted => "contracted",
        }
    }
}

/// Payload for `on_graph_summary`.
#[derive(Debug, Clone)]
pub struct GraphSummaryEvent {
    pub stage: GraphStage,
    pub summary: GraphSummary,
}

/// Payload for `on_poll_aggregated`.
#[derive(Debug, Clone)]
pub struct PollAggregatedEvent {
    pub poll: String,
    pub votes: usize,
    pub contributions: usize,
}

/// Payload for `on_edges_pruned`.
#[derive(Debug, Clone)]
pub struct EdgesPrunedEvent {
    pub pruned: usize,
    pub kept: usize,
    pub min_polls: u32,
}

/// Payload for `on_node_pruned`.
#[derive(Debug, Clone)]
pub struct NodePrunedEvent {
    pub node: NodeKey,
}

/// Payload for `on_nodes_pruned`.
#[derive(Debug, Clone)]
pub struct NodesPrunedEvent {
    pub pruned: usize,
    pub min_polls: u32,
}

/// Payload for `on_straggler_found`.
#[derive(Debug, Clone)]
pub struct StragglerFoundEvent {
    /// Contraction round, or `None` for a plain matching.
    pub round: Option<u32>,
    pub node: NodeKey,
    pub label: String,
}

/// Payload for `on_straggler_merged`.
#[derive(Debug, Clone)]
pub struct StragglerMergedEvent {
    pub round: u32,
    pub straggler: NodeKey,
    pub partner: NodeKey,
    pub composite: NodeKey,
}

/// Payload for `on_straggler_unmerged`: the straggler had no edges.
#[derive(Debug, Clone)]
pub struct StragglerUnmergedEvent {
    pub round: u32,
    pub straggler: NodeKey,
}

/// Payload for `on_round_contracted`.
#[derive(Debug, Clone)]
pub struct RoundContractedEvent {
    pub round: u32,
    pub pairings: usize,
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub edges_after: usize,
}

/// Payload for `on_stability_checked`.
#[derive(Debug, Clone)]
pub struct StabilityCheckedEvent {
    pub checks: usize,
    pub reference_size: usize,
    pub average_difference: f64,
    pub confidence: f64,
}
