//! Stability estimate: how often reruns of the oracle disagree with a
//! reference matching.

use affinity_core::errors::AffinityResult;
use affinity_core::Matching;
use serde::Serialize;

use crate::graph::WeightedGraph;
use crate::matching::MatchingAdapter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityReport {
    pub checks: usize,
    pub reference_size: usize,
    /// Rerun pairings absent from the reference, summed over all reruns.
    pub total_difference: usize,
    /// Symmetric difference with the reference, summed over all reruns.
    pub symmetric_difference: usize,
    pub average_difference: f64,
    /// `(|reference| - average_difference) / |reference|`.
    pub confidence: f64,
}

impl StabilityReport {
    /// Every rerun reproduced the reference exactly.
    pub fn is_stable(&self) -> bool {
        self.symmetric_difference == 0
    }

    /// Confidence as a percentage.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Rerun the matching `checks` times on copies of `graph` and compare each
/// result with `reference`.
pub fn check_stability(
    reference: &Matching,
    graph: &WeightedGraph,
    adapter: &MatchingAdapter<'_>,
    checks: usize,
) -> AffinityResult<StabilityReport> {
    let mut total_difference = 0;
    let mut symmetric_difference = 0;

    for check in 0..checks {
        let rerun = adapter.pair(&graph.clone())?;
        let difference = rerun.difference_count(reference);
        tracing::trace!(check, difference, "stability rerun");
        total_difference += difference;
        symmetric_difference += rerun.symmetric_difference_count(reference);
    }

    let average_difference = if checks == 0 {
        0.0
    } else {
        total_difference as f64 / checks as f64
    };

    let reference_size = reference.len();
    let confidence = if reference_size == 0 {
        if symmetric_difference == 0 {
            1.0
        } else {
            0.0
        }
    } else {
        (reference_size as f64 - average_difference) / reference_size as f64
    };

    Ok(StabilityReport {
        checks,
        reference_size,
        total_difference,
        symmetric_difference,
        average_difference,
        confidence,
    })
}
