//! Pairings produced by one matching run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::node::NodeKey;

/// Unordered pair of graph nodes. Endpoints are stored in sorted order so
/// that `(a, b)` and `(b, a)` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pairing {
    first: NodeKey,
    second: NodeKey,
}

impl Pairing {
    pub fn new(a: NodeKey, b: NodeKey) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &NodeKey {
        &self.first
    }

    pub fn second(&self) -> &NodeKey {
        &self.second
    }

    pub fn contains(&self, node: &NodeKey) -> bool {
        &self.first == node || &self.second == node
    }

    /// The endpoint opposite `node`, if `node` is part of this pairing.
    pub fn partner(&self, node: &NodeKey) -> Option<&NodeKey> {
        if &self.first == node {
            Some(&self.second)
        } else if &self.second == node {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Vertex-disjoint set of pairings from one matching run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pairs: BTreeSet<Pairing>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pairing. Returns `false` if the pairing was already present.
    pub fn insert(&mut self, pairing: Pairing) -> bool {
        self.pairs.insert(pairing)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing> {
        self.pairs.iter()
    }

    pub fn contains(&self, pairing: &Pairing) -> bool {
        self.pairs.contains(pairing)
    }

    /// Every node that appears in some pairing.
    pub fn matched_nodes(&self) -> BTreeSet<&NodeKey> {
        self.pairs
            .iter()
            .flat_map(|p| [p.first(), p.second()])
            .collect()
    }

    /// Number of pairings in `self` that are absent from `reference`.
    pub fn difference_count(&self, reference: &Matching) -> usize {
        self.pairs.difference(&reference.pairs).count()
    }

    /// Size of the symmetric difference with `other`.
    pub fn symmetric_difference_count(&self, other: &Matching) -> usize {
        self.pairs.symmetric_difference(&other.pairs).count()
    }
}

impl FromIterator<Pairing> for Matching {
    fn from_iter<I: IntoIterator<Item = Pairing>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Matching {
    type Item = &'a Pairing;
    type IntoIter = std::collections::btree_set::Iter<'a, Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
