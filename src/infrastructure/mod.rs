//! Infrastructure layer: configuration, file exports and the feedback log.

pub mod config;
pub mod feedback_log;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use feedback_log::*;
pub use logging::*;
pub use persistence::*;
