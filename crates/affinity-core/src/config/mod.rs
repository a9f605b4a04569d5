//! Configuration: TOML-based, env overrides on top, compiled defaults below.

pub mod affinity_config;
pub mod defaults;
pub mod observability_config;
pub mod pipeline_config;
pub mod poll_config;

pub use affinity_config::AffinityConfig;
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use poll_config::PollConfig;
