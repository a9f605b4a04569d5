//! Engine event handler that writes every event to `tracing`.

use affinity_core::events::*;

use crate::tracing_setup::events;

/// Logs engine events as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl TracingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

impl AffinityEventHandler for TracingEventHandler {
    fn on_graph_summary(&self, event: &GraphSummaryEvent) {
        events::graph_summary(
            event.stage.as_str(),
            event.summary.node_count,
            event.summary.edge_count,
            event.summary.mean_weight,
        );
    }

    fn on_poll_aggregated(&self, event: &PollAggregatedEvent) {
        events::poll_aggregated(&event.poll, event.votes, event.contributions);
    }

    fn on_edges_pruned(&self, event: &EdgesPrunedEvent) {
        events::edges_pruned(event.pruned, event.kept, event.min_polls);
    }

    fn on_node_pruned(&self, event: &NodePrunedEvent) {
        events::node_pruned(&event.node.to_string());
    }

    fn on_nodes_pruned(&self, event: &NodesPrunedEvent) {
        events::nodes_pruned(event.pruned, event.min_polls);
    }

    fn on_straggler_found(&self, event: &StragglerFoundEvent) {
        events::straggler_found(event.round, &event.label);
    }

    fn on_straggler_merged(&self, event: &StragglerMergedEvent) {
        events::straggler_merged(
            event.round,
            &event.straggler.to_string(),
            &event.partner.to_string(),
        );
    }

    fn on_straggler_unmerged(&self, event: &StragglerUnmergedEvent) {
        events::straggler_unmerged(event.round, &event.straggler.to_string());
    }

    fn on_round_contracted(&self, event: &RoundContractedEvent) {
        events::round_contracted(
            event.round,
            event.pairings,
            event.nodes_before,
            event.nodes_after,
        );
    }

    fn on_stability_checked(&self, event: &StabilityCheckedEvent) {
        events::stability_checked(event.checks, event.average_difference, event.confidence);
    }
}
