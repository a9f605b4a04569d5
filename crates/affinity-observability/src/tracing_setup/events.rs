//! Structured log events for the pipeline stages.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log one graph summary.
pub fn graph_summary(stage: &str, nodes: usize, edges: usize, mean_weight: Option<f64>) {
    tracing::info!(
        event = "graph_summary",
        stage = %stage,
        nodes,
        edges,
        mean_weight = ?mean_weight,
        "graph summary"
    );
}

/// Log one aggregated poll.
pub fn poll_aggregated(poll: &str, votes: usize, contributions: usize) {
    tracing::info!(
        event = "poll_aggregated",
        poll = %poll,
        votes,
        contributions,
        "votes for poll aggregated"
    );
}

/// Log edge pruning.
pub fn edges_pruned(pruned: usize, kept: usize, min_polls: u32) {
    tracing::info!(
        event = "edges_pruned",
        pruned,
        kept,
        min_polls,
        "pruned edges"
    );
}

/// Log a single pruned node.
pub fn node_pruned(node: &str) {
    tracing::debug!(event = "node_pruned", node = %node, "node pruned");
}

/// Log the node-pruning total.
pub fn nodes_pruned(pruned: usize, min_polls: u32) {
    tracing::info!(
        event = "nodes_pruned",
        pruned,
        min_polls,
        "users below the shared-poll threshold pruned"
    );
}

/// Log an unmatched node.
pub fn straggler_found(round: Option<u32>, node: &str) {
    tracing::info!(
        event = "straggler_found",
        round = ?round,
        node = %node,
        "straggler found"
    );
}

/// Log a straggler merge.
pub fn straggler_merged(round: u32, straggler: &str, partner: &str) {
    tracing::info!(
        event = "straggler_merged",
        round,
        straggler = %straggler,
        partner = %partner,
        "straggler merged into strongest neighbour"
    );
}

/// Log a straggler that had no edge to merge along.
pub fn straggler_unmerged(round: u32, straggler: &str) {
    tracing::warn!(
        event = "straggler_unmerged",
        round,
        straggler = %straggler,
        "straggler has no edges, left unmerged"
    );
}

/// Log a completed contraction round.
pub fn round_contracted(round: u32, pairings: usize, nodes_before: usize, nodes_after: usize) {
    tracing::info!(
        event = "round_contracted",
        round,
        pairings,
        nodes_before,
        nodes_after,
        "contraction round"
    );
}

/// Log the stability estimate.
pub fn stability_checked(checks: usize, average_difference: f64, confidence: f64) {
    tracing::info!(
        event = "stability_checked",
        checks,
        average_difference,
        confidence,
        "stability checked"
    );
}
