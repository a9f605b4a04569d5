//! AffinityEngine: runs the whole pipeline from votes to clusters.

use std::sync::Arc;

use affinity_core::config::PipelineConfig;
use affinity_core::errors::AffinityResult;
use affinity_core::events::{
    AffinityEventHandler, EdgesPrunedEvent, EventDispatcher, GraphStage, GraphSummaryEvent,
    NodePrunedEvent, NodesPrunedEvent, PollAggregatedEvent, StabilityCheckedEvent,
    StragglerFoundEvent,
};
use affinity_core::traits::IMatchingOracle;
use affinity_core::{AffinityConfig, GraphSummary, Matching, NodeKey, Poll, VoteBatch};

use crate::aggregation::{aggregate_poll, seed_graph};
use crate::contraction::{ClusterEngine, ClusterOutcome};
use crate::graph::{
    normalize_and_prune, prune_isolated_nodes, strongest_edges, summarize, RawGraph, Superlative,
    WeightedGraph,
};
use crate::inversion::invert_weights;
use crate::matching::{find_stragglers, weighted_pairings, BlossomMatcher, MatchingAdapter, WeightedPairing};
use crate::stability::{check_stability, StabilityReport};

/// Summary of the raw graph after one poll.
#[derive(Debug, Clone)]
pub struct PollSummary {
    pub poll: String,
    pub votes: usize,
    pub summary: GraphSummary,
}

/// Normalized graph with edge and node pruning applied.
#[derive(Debug, Clone)]
pub struct CleanGraph {
    pub graph: WeightedGraph,
    pub edges_pruned: usize,
    pub pruned_nodes: Vec<NodeKey>,
}

/// Every output of `AffinityEngine::run`.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub initial_summary: GraphSummary,
    pub poll_summaries: Vec<PollSummary>,
    pub raw_graph: RawGraph,
    pub clean: CleanGraph,
    pub clean_summary: GraphSummary,
    /// Graph handed to the oracle: the clean graph, inverted in worst mode.
    pub matching_graph: WeightedGraph,
    pub inverted: bool,
    pub matching: Matching,
    /// Pairings with their clean-graph weights.
    pub pairings: Vec<WeightedPairing>,
    pub stragglers: Vec<NodeKey>,
    pub stability: StabilityReport,
    pub strongest: Option<Superlative>,
    pub clusters: ClusterOutcome,
}

/// Pipeline orchestrator.
pub struct AffinityEngine {
    config: PipelineConfig,
    oracle: Box<dyn IMatchingOracle>,
    dispatcher: EventDispatcher,
    verbose_pruning: bool,
}

impl AffinityEngine {
    /// Engine with the built-in blossom oracle, shuffled when the config
    /// carries a seed.
    pub fn new(config: PipelineConfig) -> Self {
        let oracle: Box<dyn IMatchingOracle> = match config.shuffle_seed {
            Some(seed) => Box::new(BlossomMatcher::shuffled(seed)),
            None => Box::new(BlossomMatcher::new()),
        };
        Self {
            config,
            oracle,
            dispatcher: EventDispatcher::new(),
            verbose_pruning: true,
        }
    }

    pub fn from_config(config: &AffinityConfig) -> Self {
        Self::new(config.pipeline.clone()).with_verbose_pruning(config.observability.verbose_pruning)
    }

    /// Replace the matching oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn IMatchingOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_verbose_pruning(mut self, verbose: bool) -> Self {
        self.verbose_pruning = verbose;
        self
    }

    pub fn register_handler(&mut self, handler: Arc<dyn AffinityEventHandler>) {
        self.dispatcher.register(handler);
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn adapter(&self) -> MatchingAdapter<'_> {
        MatchingAdapter::new(self.oracle.as_ref())
    }

    /// Seed every user as a node and aggregate each poll in order.
    pub fn build_graph(&self, batch: &VoteBatch, polls: &[Poll]) -> (RawGraph, Vec<PollSummary>) {
        let _span = crate::aggregation_span!(batch.users.len(), polls.len()).entered();

        let mut graph = seed_graph(&batch.users);
        self.dispatcher.emit_graph_summary(&GraphSummaryEvent {
            stage: GraphStage::Initial,
            summary: summarize(&graph),
        });

        let mut summaries = Vec::with_capacity(polls.len());
        for poll in polls {
            let (next, outcome) = aggregate_poll(&graph, &batch.votes, poll);
            graph = next;

            let summary = summarize(&graph);
            self.dispatcher.emit_poll_aggregated(&PollAggregatedEvent {
                poll: poll.name.clone(),
                votes: outcome.votes,
                contributions: outcome.contributions,
            });
            self.dispatcher.emit_graph_summary(&GraphSummaryEvent {
                stage: GraphStage::Aggregated,
                summary,
            });
            summaries.push(PollSummary {
                poll: poll.name.clone(),
                votes: outcome.votes,
                summary,
            });
        }
        (graph, summaries)
    }

    /// Normalize, drop edges below `min_polls`, then drop edgeless nodes.
    pub fn clean_graph(&self, raw: &RawGraph) -> AffinityResult<CleanGraph> {
        let min_polls = self.config.min_polls;
        let _span = crate::pruning_span!(min_polls).entered();

        let normalized = normalize_and_prune(raw, min_polls)?;
        self.dispatcher.emit_edges_pruned(&EdgesPrunedEvent {
            pruned: normalized.edges_pruned,
            kept: normalized.graph.edge_count(),
            min_polls,
        });

        let nodes = prune_isolated_nodes(&normalized.graph);
        if self.verbose_pruning {
            for node in &nodes.removed {
                self.dispatcher
                    .emit_node_pruned(&NodePrunedEvent { node: node.clone() });
            }
        }
        self.dispatcher.emit_nodes_pruned(&NodesPrunedEvent {
            pruned: nodes.removed.len(),
            min_polls,
        });
        tracing::info!(
            edges_pruned = normalized.edges_pruned,
            nodes_pruned = nodes.removed.len(),
            "graph cleaned"
        );

        Ok(CleanGraph {
            graph: nodes.graph,
            edges_pruned: normalized.edges_pruned,
            pruned_nodes: nodes.removed,
        })
    }

    /// One maximum-weight matching of `graph`.
    pub fn pair(&self, graph: &WeightedGraph) -> AffinityResult<Matching> {
        let _span = crate::matching_span!(graph.node_count(), self.oracle.name()).entered();
        self.adapter().pair(graph)
    }

    /// Run every stage and collect the outputs.
    pub fn run(&self, batch: &VoteBatch, polls: &[Poll]) -> AffinityResult<PipelineOutcome> {
        let initial_summary = summarize(&seed_graph(&batch.users));
        let (raw_graph, poll_summaries) = self.build_graph(batch, polls);

        let clean = self.clean_graph(&raw_graph)?;
        let clean_summary = summarize(&clean.graph);
        self.dispatcher.emit_graph_summary(&GraphSummaryEvent {
            stage: GraphStage::Pruned,
            summary: clean_summary,
        });

        let inverted = self.config.invert_weights;
        let matching_graph = if inverted {
            invert_weights(&clean.graph, self.config.inversion_epsilon)
        } else {
            clean.graph.clone()
        };

        let matching = self.pair(&matching_graph)?;
        let pairings = weighted_pairings(&clean.graph, &matching);

        let stragglers = find_stragglers(&matching_graph, &matching);
        for node in &stragglers {
            tracing::info!(straggler = %node, "unmatched node");
            self.dispatcher.emit_straggler_found(&StragglerFoundEvent {
                round: None,
                node: node.clone(),
                label: node.to_string(),
            });
        }

        let stability = {
            let _span = crate::stability_span!(self.config.stability_checks).entered();
            check_stability(
                &matching,
                &matching_graph,
                &self.adapter(),
                self.config.stability_checks,
            )?
        };
        self.dispatcher.emit_stability_checked(&StabilityCheckedEvent {
            checks: stability.checks,
            reference_size: stability.reference_size,
            average_difference: stability.average_difference,
            confidence: stability.confidence,
        });

        let strongest = strongest_edges(&clean.graph);

        let clusters = {
            let _span = crate::contraction_span!(self.config.cluster_power).entered();
            ClusterEngine::new(self.adapter())
                .with_dispatcher(&self.dispatcher)
                .cluster(&matching_graph, self.config.cluster_power)?
        };

        Ok(PipelineOutcome {
            initial_summary,
            poll_summaries,
            raw_graph,
            clean,
            clean_summary,
            matching_graph,
            inverted,
            matching,
            pairings,
            stragglers,
            stability,
            strongest,
            clusters,
        })
    }
}

impl std::fmt::Debug for AffinityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffinityEngine")
            .field("config", &self.config)
            .field("oracle", &self.oracle.name())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
