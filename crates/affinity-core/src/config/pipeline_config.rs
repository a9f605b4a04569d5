use serde::{Deserialize, Serialize};

use super::defaults;

/// Knobs for the graph pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum number of shared polls for an edge to survive pruning. Default: 2.
    pub min_polls: u32,
    /// Number of contraction rounds when clustering. Default: 5.
    pub cluster_power: u32,
    /// Matching reruns used to estimate stability. Default: 20.
    pub stability_checks: usize,
    /// Match on inverted weights to find the worst pairing. Default: false.
    pub invert_weights: bool,
    /// Offset keeping inverted weights strictly positive. Default: 0.01.
    pub inversion_epsilon: f64,
    /// Seed for randomized tie-breaking in the built-in oracle. Default: none.
    pub shuffle_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_polls: defaults::DEFAULT_MIN_POLLS,
            cluster_power: defaults::DEFAULT_CLUSTER_POWER,
            stability_checks: defaults::DEFAULT_STABILITY_CHECKS,
            invert_weights: defaults::DEFAULT_INVERT_WEIGHTS,
            inversion_epsilon: defaults::DEFAULT_INVERSION_EPSILON,
            shuffle_seed: None,
        }
    }
}
