//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ObservabilityConfig, PipelineConfig, PollConfig};
use crate::errors::ConfigError;
use crate::models::Poll;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AFFINITY_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AffinityConfig {
    pub pipeline: PipelineConfig,
    pub observability: ObservabilityConfig,
    pub polls: Vec<PollConfig>,
}

impl AffinityConfig {
    /// Load from a TOML file, apply environment overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: AffinityConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No env overrides are applied.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `AFFINITY_MIN_POLLS`, `AFFINITY_CLUSTER_POWER` and
    /// `AFFINITY_STABILITY_CHECKS` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("AFFINITY_MIN_POLLS").and_then(|s| s.parse::<u32>().ok()) {
            self.pipeline.min_polls = v;
        }
        if let Some(v) = lookup("AFFINITY_CLUSTER_POWER").and_then(|s| s.parse::<u32>().ok()) {
            self.pipeline.cluster_power = v;
        }
        if let Some(v) = lookup("AFFINITY_STABILITY_CHECKS").and_then(|s| s.parse::<usize>().ok())
        {
            self.pipeline.stability_checks = v;
        }
    }

    /// Validate the configuration values and every poll matrix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.min_polls == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.min_polls".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.pipeline.cluster_power == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.cluster_power".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.pipeline.stability_checks == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.stability_checks".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.pipeline.inversion_epsilon > 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.inversion_epsilon".to_string(),
                message: "must be strictly positive".to_string(),
            });
        }
        for poll in &self.polls {
            poll.to_poll()?;
        }
        Ok(())
    }

    /// Build the runtime polls in declaration order.
    pub fn polls(&self) -> Result<Vec<Poll>, ConfigError> {
        self.polls.iter().map(PollConfig::to_poll).collect()
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
