//! AffinityEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling engine events.
///
/// Handlers only override the events they care about. Pruning and straggler
/// events are informational and never abort the pipeline.
pub trait AffinityEventHandler: Send + Sync {
    // ---- Graph construction ----
    fn on_graph_summary(&self, _event: &GraphSummaryEvent) {}
    fn on_poll_aggregated(&self, _event: &PollAggregatedEvent) {}

    // ---- Pruning ----
    fn on_edges_pruned(&self, _event: &EdgesPrunedEvent) {}
    fn on_node_pruned(&self, _event: &NodePrunedEvent) {}
    fn on_nodes_pruned(&self, _event: &NodesPrunedEvent) {}

    // ---- Matching & contraction ----
    fn on_straggler_found(&self, _event: &StragglerFoundEvent) {}
    fn on_straggler_merged(&self, _event: &StragglerMergedEvent) {}
    fn on_straggler_unmerged(&self, _event: &StragglerUnmergedEvent) {}
    fn on_round_contracted(&self, _event: &RoundContractedEvent) {}

    // ---- Stability ----
    fn on_stability_checked(&self, _event: &StabilityCheckedEvent) {}
}
