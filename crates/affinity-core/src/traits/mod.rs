//! Seams between the engine and its external collaborators.

pub mod matching_oracle;

pub use matching_oracle::{IMatchingOracle, MatchingProblem, WeightedEdge};
