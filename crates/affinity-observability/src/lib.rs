//! # affinity-observability
//!
//! Tracing setup, structured log events, the `TracingEventHandler` that turns
//! engine events into log lines, and text/JSON rendering of pipeline results.

pub mod handler;
pub mod report;
pub mod tracing_setup;

pub use handler::TracingEventHandler;
pub use report::{PairingLine, Report};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
