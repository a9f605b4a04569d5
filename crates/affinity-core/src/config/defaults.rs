// Single source of truth for all default values.

// --- Pipeline ---
pub const DEFAULT_MIN_POLLS: u32 = 2;
pub const DEFAULT_CLUSTER_POWER: u32 = 5;
pub const DEFAULT_STABILITY_CHECKS: usize = 20;
pub const DEFAULT_INVERT_WEIGHTS: bool = false;
pub const DEFAULT_INVERSION_EPSILON: f64 = 0.01;

// --- Polls ---
pub const DEFAULT_POLL_WEIGHT: i64 = 1;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_VERBOSE_PRUNING: bool = true;
