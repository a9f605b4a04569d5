//! Iterative clustering: match, contract, repeat.
//!
//! Each round pairs the current nodes with the matching oracle and contracts
//! every pairing, plus one straggler that still has an edge, into a composite
//! node. After `P` rounds a cluster holds up to `2^P` original users.

mod forest;
mod round;

pub use forest::{ClusterForest, CompositeNode};
pub use round::{contract_round, merge_nodes, strongest_neighbour, RoundOutcome, StragglerResolution};

use affinity_core::errors::AffinityResult;
use affinity_core::events::{
    EventDispatcher, GraphStage, GraphSummaryEvent, RoundContractedEvent, StragglerFoundEvent,
    StragglerMergedEvent, StragglerUnmergedEvent,
};
use affinity_core::{Matching, NodeKey, UserId};
use serde::Serialize;

use crate::graph::{summarize, WeightedGraph};
use crate::matching::MatchingAdapter;

/// Per-round bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub pairings: usize,
    pub straggler: StragglerResolution,
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub edges_after: usize,
}

/// Result of `ClusterEngine::cluster`.
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    /// Pairings of the last round that produced any.
    pub pairings: Matching,
    /// The graph those pairings were computed on.
    pub matched_graph: WeightedGraph,
    /// Composites created by that round that survive in `graph`.
    pub cluster_nodes: Vec<NodeKey>,
    /// The graph after the last contraction.
    pub graph: WeightedGraph,
    pub forest: ClusterForest,
    pub rounds: Vec<RoundSummary>,
}

impl ClusterOutcome {
    /// Users of every cluster formed in the last productive round,
    /// including a straggler absorbed into it.
    pub fn clusters(&self) -> Vec<Vec<UserId>> {
        self.cluster_nodes
            .iter()
            .map(|node| self.forest.members(node))
            .collect()
    }

    /// `"A + B"` label of one side of a final pairing.
    pub fn label(&self, node: &NodeKey) -> String {
        self.forest.label(node)
    }
}

/// Drives contraction rounds against a matching oracle.
pub struct ClusterEngine<'a> {
    adapter: MatchingAdapter<'a>,
    dispatcher: Option<&'a EventDispatcher>,
}

impl<'a> ClusterEngine<'a> {
    pub fn new(adapter: MatchingAdapter<'a>) -> Self {
        Self {
            adapter,
            dispatcher: None,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: &'a EventDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Run up to `power` rounds. A round whose matching is empty ends
    /// clustering early; the previous round's pairings are kept.
    pub fn cluster(&self, graph: &WeightedGraph, power: u32) -> AffinityResult<ClusterOutcome> {
        let mut forest = ClusterForest::new();
        let mut current = graph.clone();
        let mut pairings = Matching::new();
        let mut matched_graph = graph.clone();
        let mut cluster_nodes = Vec::new();
        let mut rounds = Vec::new();

        for round in 1..=power {
            let matching = self.adapter.pair(&current)?;
            if matching.is_empty() {
                tracing::debug!(round, "empty matching, clustering stops");
                break;
            }

            let nodes_before = current.node_count();
            let outcome = contract_round(&current, &matching, &mut forest)?;
            self.report_stragglers(round, &outcome, &forest);

            let summary = RoundSummary {
                round,
                pairings: matching.len(),
                straggler: outcome.straggler.clone(),
                nodes_before,
                nodes_after: outcome.graph.node_count(),
                edges_after: outcome.graph.edge_count(),
            };
            tracing::info!(
                round,
                pairings = summary.pairings,
                nodes_before,
                nodes_after = summary.nodes_after,
                "contraction round complete"
            );
            if let Some(dispatcher) = self.dispatcher {
                dispatcher.emit_round_contracted(&RoundContractedEvent {
                    round,
                    pairings: summary.pairings,
                    nodes_before,
                    nodes_after: summary.nodes_after,
                    edges_after: summary.edges_after,
                });
                dispatcher.emit_graph_summary(&GraphSummaryEvent {
                    stage: GraphStage::Contracted,
                    summary: summarize(&outcome.graph),
                });
            }
            rounds.push(summary);

            cluster_nodes = outcome.merged.clone();
            if let StragglerResolution::Merged { composite, .. } = &outcome.straggler {
                if outcome.graph.contains(composite) {
                    cluster_nodes.push(composite.clone());
                }
            }
            pairings = matching;
            matched_graph = std::mem::replace(&mut current, outcome.graph);
        }

        Ok(ClusterOutcome {
            pairings,
            matched_graph,
            cluster_nodes,
            graph: current,
            forest,
            rounds,
        })
    }

    fn report_stragglers(&self, round: u32, outcome: &RoundOutcome, forest: &ClusterForest) {
        let Some(dispatcher) = self.dispatcher else {
            return;
        };
        match &outcome.straggler {
            StragglerResolution::NoStraggler => {}
            StragglerResolution::Merged {
                straggler,
                partner,
                composite,
            } => {
                dispatcher.emit_straggler_found(&StragglerFoundEvent {
                    round: Some(round),
                    node: straggler.clone(),
                    label: forest.label(straggler),
                });
                dispatcher.emit_straggler_merged(&StragglerMergedEvent {
                    round,
                    straggler: straggler.clone(),
                    partner: partner.clone(),
                    composite: composite.clone(),
                });
            }
            StragglerResolution::Isolated { straggler } => {
                dispatcher.emit_straggler_found(&StragglerFoundEvent {
                    round: Some(round),
                    node: straggler.clone(),
                    label: forest.label(straggler),
                });
                dispatcher.emit_straggler_unmerged(&StragglerUnmergedEvent {
                    round,
                    straggler: straggler.clone(),
                });
            }
        }
        for node in &outcome.leftover {
            dispatcher.emit_straggler_found(&StragglerFoundEvent {
                round: Some(round),
                node: node.clone(),
                label: forest.label(node),
            });
        }
    }
}
