//! Engine events consumed by the reporting collaborator.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::AffinityEventHandler;
pub use types::*;
