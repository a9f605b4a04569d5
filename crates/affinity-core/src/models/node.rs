//! Graph node identity.
//!
//! Original users keep their name as identity. Composite nodes created by
//! contraction get a generated numeric id; their membership lives in the
//! cluster forest, not in the name.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vote::UserId;

/// Stable identifier of a composite (contracted) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeId(pub u32);

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster-{}", self.0)
    }
}

/// Identity of a node in any affinity graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    User(UserId),
    Composite(CompositeId),
}

impl NodeKey {
    pub fn user(name: impl Into<String>) -> Self {
        Self::User(UserId::new(name))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => user.fmt(f),
            Self::Composite(id) => id.fmt(f),
        }
    }
}

impl From<UserId> for NodeKey {
    fn from(user: UserId) -> Self {
        Self::User(user)
    }
}

impl From<CompositeId> for NodeKey {
    fn from(id: CompositeId) -> Self {
        Self::Composite(id)
    }
}
