//! Standard callbacks.

pub mod logging;

pub use logging::LoggingAction;
