//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::AffinityEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered every `emit_*` is a loop over an empty Vec.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AffinityEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AffinityEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn AffinityEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            f(handler.as_ref());
        }
    }

    pub fn emit_graph_summary(&self, event: &GraphSummaryEvent) {
        self.emit(|h| h.on_graph_summary(event));
    }

    pub fn emit_poll_aggregated(&self, event: &PollAggregatedEvent) {
        self.emit(|h| h.on_poll_aggregated(event));
    }

    pub fn emit_edges_pruned(&self, event: &EdgesPrunedEvent) {
        self.emit(|h| h.on_edges_pruned(event));
    }

    pub fn emit_node_pruned(&self, event: &NodePrunedEvent) {
        self.emit(|h| h.on_node_pruned(event));
    }

    pub fn emit_nodes_pruned(&self, event: &NodesPrunedEvent) {
        self.emit(|h| h.on_nodes_pruned(event));
    }

    pub fn emit_straggler_found(&self, event: &StragglerFoundEvent) {
        self.emit(|h| h.on_straggler_found(event));
    }

    pub fn emit_straggler_merged(&self, event: &StragglerMergedEvent) {
        self.emit(|h| h.on_straggler_merged(event));
    }

    pub fn emit_straggler_unmerged(&self, event: &StragglerUnmergedEvent) {
        self.emit(|h| h.on_straggler_unmerged(event));
    }

    pub fn emit_round_contracted(&self, event: &RoundContractedEvent) {
        self.emit(|h| h.on_round_contracted(event));
    }

    pub fn emit_stability_checked(&self, event: &StabilityCheckedEvent) {
        self.emit(|h| h.on_stability_checked(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
