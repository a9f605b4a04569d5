//! Poll definitions as they appear in `[[polls]]` tables.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::{CompatibilityMatrix, Poll};

/// One poll: ordered answers, a square score matrix, and a weight multiplier.
///
/// ```toml
/// [[polls]]
/// name = "scary movies"
/// answers = ["yes", "no"]
/// matrix = [[5, 0], [0, 5]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: i64,
    pub answers: Vec<String>,
    pub matrix: Vec<Vec<i64>>,
}

fn default_weight() -> i64 {
    defaults::DEFAULT_POLL_WEIGHT
}

impl PollConfig {
    /// Validate the matrix and build the runtime poll.
    pub fn to_poll(&self) -> Result<Poll, ConfigError> {
        let matrix = CompatibilityMatrix::from_rows(&self.name, &self.answers, &self.matrix)?;
        Ok(Poll::new(self.name.clone(), matrix, self.weight))
    }
}
