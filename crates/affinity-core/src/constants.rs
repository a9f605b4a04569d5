/// Affinity engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line that terminates the alternating user/answer vote stream.
pub const INPUT_SENTINEL: &str = "done";

/// Separator used when rendering a composite node's label.
pub const COMPOSITE_SEPARATOR: &str = " + ";

/// Divisor turning the shared-poll count into the normalization bonus.
pub const COMMON_BONUS_DIVISOR: f64 = 100.0;

/// Decimal places used when reporting weights.
pub const REPORT_WEIGHT_PRECISION: usize = 2;
