//! Composite node bookkeeping.
//!
//! A composite owns a generated id and the ordered list of nodes it was
//! merged from; those may themselves be composites.

use std::collections::BTreeMap;

use affinity_core::constants::COMPOSITE_SEPARATOR;
use affinity_core::{CompositeId, NodeKey, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeNode {
    pub id: CompositeId,
    pub parts: Vec<NodeKey>,
}

/// Every composite created during clustering, keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterForest {
    composites: BTreeMap<CompositeId, CompositeNode>,
    next_id: u32,
}

impl ClusterForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composite made of `parts` and return its node key.
    pub fn compose(&mut self, parts: Vec<NodeKey>) -> NodeKey {
        let id = CompositeId(self.next_id);
        self.next_id += 1;
        self.composites.insert(id, CompositeNode { id, parts });
        NodeKey::Composite(id)
    }

    pub fn get(&self, id: CompositeId) -> Option<&CompositeNode> {
        self.composites.get(&id)
    }

    /// Direct constituents; a user is its own single part.
    pub fn parts(&self, node: &NodeKey) -> Vec<NodeKey> {
        match node {
            NodeKey::User(_) => vec![node.clone()],
            NodeKey::Composite(id) => self
                .composites
                .get(id)
                .map(|c| c.parts.clone())
                .unwrap_or_default(),
        }
    }

    /// Original users under `node`, depth-first in part order.
    pub fn members(&self, node: &NodeKey) -> Vec<UserId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            match current {
                NodeKey::User(user) => out.push(user.clone()),
                NodeKey::Composite(id) => {
                    if let Some(composite) = self.composites.get(id) {
                        stack.extend(composite.parts.iter().rev());
                    }
                }
            }
        }
        out
    }

    /// Display label, e.g. `"A + B + C"`.
    pub fn label(&self, node: &NodeKey) -> String {
        self.members(node)
            .iter()
            .map(UserId::as_str)
            .collect::<Vec<_>>()
            .join(COMPOSITE_SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.composites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositeNode> {
        self.composites.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_composites_flatten_in_part_order() {
        let mut forest = ClusterForest::new();
        let ab = forest.compose(vec![NodeKey::user("A"), NodeKey::user("B")]);
        let cd = forest.compose(vec![NodeKey::user("C"), NodeKey::user("D")]);
        let all = forest.compose(vec![ab.clone(), cd]);

        assert_eq!(forest.label(&ab), "A + B");
        assert_eq!(forest.label(&all), "A + B + C + D");
        assert_eq!(forest.members(&all).len(), 4);
        assert_eq!(forest.parts(&all).len(), 2);
        assert_eq!(forest.len(), 3);
    }

    #[test]
    fn users_label_themselves() {
        let forest = ClusterForest::new();
        assert_eq!(forest.label(&NodeKey::user("solo")), "solo");
    }
}
