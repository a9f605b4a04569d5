//! # affinity-core
//!
//! Foundation crate for the affinity matching engine.
//! Defines the vote and poll model, node and pairing identities, errors,
//! config, constants, events, and the matching-oracle seam.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod input;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AffinityConfig;
pub use errors::{AffinityError, AffinityResult};
pub use input::{parse_votes, VoteBatch};
pub use models::{
    AnswerId, CompatibilityMatrix, CompositeId, GraphSummary, Matching, NodeKey, Pairing, Poll,
    UserId, Vote,
};
