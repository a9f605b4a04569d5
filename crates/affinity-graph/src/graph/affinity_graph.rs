//! petgraph::StableGraph wrapper keyed by `NodeKey`, undirected.

use std::collections::HashMap;

use affinity_core::NodeKey;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

/// Edge attributes of the raw (unpruned) graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAffinity {
    /// Accumulated weighted score across polls.
    pub weight: f64,
    /// Number of polls in which both endpoints voted.
    pub common: u32,
}

/// Anything that carries a scalar edge weight.
pub trait EdgeWeight {
    fn weight(&self) -> f64;
}

impl EdgeWeight for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

impl EdgeWeight for RawAffinity {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// The underlying undirected graph type.
pub type AffinityStableGraph<E> = StableGraph<NodeKey, E, Undirected>;

/// Wrapper providing keyed access to an affinity graph.
///
/// Simple by construction: `set_edge` refuses self-edges and replaces the
/// existing edge between two nodes instead of adding a parallel one.
#[derive(Debug, Clone)]
pub struct AffinityGraph<E> {
    /// The petgraph stable graph.
    pub graph: AffinityStableGraph<E>,
    /// Map from node key → NodeIndex for O(1) lookup.
    pub node_index: HashMap<NodeKey, NodeIndex>,
}

/// Graph with `weight` + `common` edges, straight out of aggregation.
pub type RawGraph = AffinityGraph<RawAffinity>;

/// Graph with a single normalized weight per edge.
pub type WeightedGraph = AffinityGraph<f64>;

impl<E> AffinityGraph<E> {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            node_index: HashMap::new(),
        }
    }

    /// Get or create the node for `key`.
    pub fn ensure_node(&mut self, key: &NodeKey) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.node_index.insert(key.clone(), idx);
        idx
    }

    pub fn get_node(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.node_index.get(key).copied()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_index.contains_key(key)
    }

    /// Remove a node and all its edges.
    pub fn remove_node(&mut self, key: &NodeKey) -> bool {
        if let Some(idx) = self.node_index.remove(key) {
            self.graph.remove_node(idx);
            true
        } else {
            false
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node keys in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Every edge once, in edge index order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &E)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                &self.graph[e.source()],
                &self.graph[e.target()],
                e.weight(),
            )
        })
    }

    pub fn edge(&self, a: &NodeKey, b: &NodeKey) -> Option<&E> {
        let edge = self.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }

    pub fn edge_mut(&mut self, a: &NodeKey, b: &NodeKey) -> Option<&mut E> {
        let edge = self.find_edge(a, b)?;
        self.graph.edge_weight_mut(edge)
    }

    fn find_edge(&self, a: &NodeKey, b: &NodeKey) -> Option<EdgeIndex> {
        let a = self.get_node(a)?;
        let b = self.get_node(b)?;
        self.graph.find_edge(a, b)
    }

    /// Insert or replace the edge between `a` and `b`, creating missing
    /// nodes. Self-edges are refused and return `None`.
    pub fn set_edge(&mut self, a: &NodeKey, b: &NodeKey, weight: E) -> Option<EdgeIndex> {
        if a == b {
            return None;
        }
        let a = self.ensure_node(a);
        let b = self.ensure_node(b);
        Some(self.graph.update_edge(a, b, weight))
    }

    /// Neighbors of `key` with the connecting edge, ordered by node index.
    pub fn neighbors(&self, key: &NodeKey) -> Vec<(&NodeKey, &E)> {
        let Some(idx) = self.get_node(key) else {
            return Vec::new();
        };
        let mut out: Vec<(NodeIndex, &E)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx {
                    e.target()
                } else {
                    e.source()
                };
                (other, e.weight())
            })
            .collect();
        out.sort_by_key(|(other, _)| *other);
        out.into_iter()
            .map(|(other, weight)| (&self.graph[other], weight))
            .collect()
    }

    pub fn degree(&self, key: &NodeKey) -> usize {
        self.get_node(key)
            .map(|idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    /// Nodes with no incident edge, in index order.
    pub fn isolated_nodes(&self) -> Vec<NodeKey> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges(idx).next().is_none())
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }
}

impl<E: EdgeWeight> AffinityGraph<E> {
    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.graph
            .edge_references()
            .map(|e| e.weight().weight())
            .sum()
    }

    /// Sum of the weights of edges incident to `key`.
    pub fn incident_weight(&self, key: &NodeKey) -> f64 {
        self.neighbors(key).iter().map(|(_, w)| w.weight()).sum()
    }
}

impl<E> Default for AffinityGraph<E> {
    fn default() -> Self {
        Self::new()
    }
}
