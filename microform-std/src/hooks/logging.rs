//! Logging action for observing lifecycle tags.

use microform_core::{Action, BoxError, Message};
use std::fmt::Debug;

/// An action that logs the options it receives.
///
/// It uses the `tracing` crate when the `tracing` feature is enabled and
/// does nothing otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use microform_std::hooks::LoggingAction;
///
/// let logging = ActionRef::from_action(LoggingAction::named("submit"));
/// bus.add_action("submit", &logging, DEFAULT_PRIORITY);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingAction {
    name: &'static str,
}

impl LoggingAction {
    /// Create a new `LoggingAction` with a default name.
    pub fn new() -> Self {
        Self { name: "form" }
    }

    /// Create a new `LoggingAction` with a custom name.
    ///
    /// The name is used in log messages to identify the tag being observed.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Action<V> for LoggingAction
where
    V: Message + Debug,
{
    fn run(&self, options: &V) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(name = %self.name, ?options, "form event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = options; // Suppress unused warning
        }
        Ok(())
    }
}
