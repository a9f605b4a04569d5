//! Span definitions per pipeline stage: aggregation, pruning, matching,
//! contraction, stability.

/// Create an aggregation span.
#[macro_export]
macro_rules! aggregation_span {
    ($users:expr, $polls:expr) => {
        tracing::info_span!($crate::spans::names::AGGREGATION, users = $users, polls = $polls)
    };
}

/// Create a pruning span.
#[macro_export]
macro_rules! pruning_span {
    ($min_polls:expr) => {
        tracing::info_span!($crate::spans::names::PRUNING, min_polls = $min_polls)
    };
}

/// Create a matching span.
#[macro_export]
macro_rules! matching_span {
    ($nodes:expr, $oracle:expr) => {
        tracing::info_span!($crate::spans::names::MATCHING, nodes = $nodes, oracle = %$oracle)
    };
}

/// Create a contraction span.
#[macro_export]
macro_rules! contraction_span {
    ($power:expr) => {
        tracing::info_span!($crate::spans::names::CONTRACTION, power = $power)
    };
}

/// Create a stability span.
#[macro_export]
macro_rules! stability_span {
    ($checks:expr) => {
        tracing::info_span!($crate::spans::names::STABILITY, checks = $checks)
    };
}


/// Span names, one per stage.
pub mod names {
    pub const AGGREGATION: &str = "affinity.aggregation";
    pub const PRUNING: &str = "affinity.pruning";
    pub const MATCHING: &str = "affinity.matching";
    pub const CONTRACTION: &str = "affinity.contraction";
    pub const STABILITY: &str = "affinity.stability";
}
