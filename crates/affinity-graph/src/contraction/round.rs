//! One contraction round: merge the straggler, then every pairing.
//!
//! Merges are applied one after another to the same working graph, so a
//! merge sees the edges produced by every merge before it.

use std::collections::HashMap;

use affinity_core::errors::{AffinityResult, GraphError};
use affinity_core::{Matching, NodeKey};
use serde::Serialize;

use super::forest::ClusterForest;
use crate::graph::WeightedGraph;
use crate::matching::find_stragglers;

/// What happened to the round's straggler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StragglerResolution {
    /// Every node was matched.
    NoStraggler,
    /// Merged into its strongest neighbour.
    Merged {
        straggler: NodeKey,
        partner: NodeKey,
        composite: NodeKey,
    },
    /// Every unmatched node is edgeless; the first one stays as it is.
    Isolated { straggler: NodeKey },
}

#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub graph: WeightedGraph,
    pub straggler: StragglerResolution,
    /// Unmatched nodes other than the straggler, carried over untouched.
    pub leftover: Vec<NodeKey>,
    /// Composites created by pairing merges, in merge order.
    pub merged: Vec<NodeKey>,
}

/// Replace `a` and `b` with `composite`. External edges are summed per
/// neighbour; the `a`-`b` edge is dropped.
pub fn merge_nodes(graph: &mut WeightedGraph, a: &NodeKey, b: &NodeKey, composite: &NodeKey) {
    let mut order: Vec<NodeKey> = Vec::new();
    let mut sums: HashMap<NodeKey, f64> = HashMap::new();
    for side in [a, b] {
        for (neighbour, &weight) in graph.neighbors(side) {
            if neighbour == a || neighbour == b {
                continue;
            }
            match sums.get_mut(neighbour) {
                Some(total) => *total += weight,
                None => {
                    order.push(neighbour.clone());
                    sums.insert(neighbour.clone(), weight);
                }
            }
        }
    }

    graph.remove_node(a);
    graph.remove_node(b);
    graph.ensure_node(composite);
    for neighbour in order {
        let weight = sums.get(&neighbour).copied().unwrap_or_default();
        graph.set_edge(composite, &neighbour, weight);
    }
}

/// Strongest neighbour of `node`; the first in node order wins ties.
pub fn strongest_neighbour(graph: &WeightedGraph, node: &NodeKey) -> Option<(NodeKey, f64)> {
    let mut best: Option<(&NodeKey, f64)> = None;
    for (neighbour, &weight) in graph.neighbors(node) {
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((neighbour, weight));
        }
    }
    best.map(|(key, weight)| (key.clone(), weight))
}

/// Contract `graph` according to `matching`.
///
/// The first unmatched node that still has an edge is merged into its
/// strongest neighbour before any pairing. Edgeless unmatched nodes can never
/// merge, so they never take the straggler slot. A pairing that names a node
/// absorbed earlier in the round is applied to the composite that absorbed it.
pub fn contract_round(
    graph: &WeightedGraph,
    matching: &Matching,
    forest: &mut ClusterForest,
) -> AffinityResult<RoundOutcome> {
    let mut working = graph.clone();
    let mut absorbed: HashMap<NodeKey, NodeKey> = HashMap::new();

    let mut leftover = find_stragglers(graph, matching);
    let mergeable = leftover.iter().position(|node| graph.degree(node) > 0);
    let straggler = match mergeable {
        Some(at) => {
            let straggler = leftover.remove(at);
            match strongest_neighbour(&working, &straggler) {
                Some((partner, _)) => {
                    let composite = forest.compose(vec![partner.clone(), straggler.clone()]);
                    merge_nodes(&mut working, &partner, &straggler, &composite);
                    absorbed.insert(partner.clone(), composite.clone());
                    absorbed.insert(straggler.clone(), composite.clone());
                    StragglerResolution::Merged {
                        straggler,
                        partner,
                        composite,
                    }
                }
                None => StragglerResolution::Isolated { straggler },
            }
        }
        None if leftover.is_empty() => StragglerResolution::NoStraggler,
        None => StragglerResolution::Isolated {
            straggler: leftover.remove(0),
        },
    };

    let mut merged = Vec::with_capacity(matching.len());
    for pairing in matching {
        let a = resolve(&absorbed, pairing.first());
        let b = resolve(&absorbed, pairing.second());
        if a == b {
            continue;
        }
        for node in [&a, &b] {
            if !working.contains(node) {
                return Err(GraphError::UnknownNode {
                    node: node.to_string(),
                }
                .into());
            }
        }
        let composite = forest.compose(vec![a.clone(), b.clone()]);
        merge_nodes(&mut working, &a, &b, &composite);
        absorbed.insert(a, composite.clone());
        absorbed.insert(b, composite.clone());
        merged.push(composite);
    }

    Ok(RoundOutcome {
        graph: working,
        straggler,
        leftover,
        merged,
    })
}

/// Follow absorption links to the node currently standing for `node`.
fn resolve(absorbed: &HashMap<NodeKey, NodeKey>, node: &NodeKey) -> NodeKey {
    let mut current = node;
    while let Some(next) = absorbed.get(current) {
        current = next;
    }
    current.clone()
}
