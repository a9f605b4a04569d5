//! Data model shared by every stage of the pipeline.

pub mod node;
pub mod pairing;
pub mod poll;
pub mod summary;
pub mod vote;

pub use node::{CompositeId, NodeKey};
pub use pairing::{Matching, Pairing};
pub use poll::{CompatibilityMatrix, Poll};
pub use summary::GraphSummary;
pub use vote::{AnswerId, UserId, Vote};
