//! Testing utilities for Microform.
//!
//! This module provides callbacks that make asserting on bus traffic easier.
//!
//! # Features
//!
//! - [`RecordingAction`]: An action that records every options value it receives
//! - [`RecordingFilter`]: A filter that records values and passes them through
//! - [`FailingFilter`]: A filter that always fails

use microform_core::{Action, ActionRef, BoxError, Callback, Filter, FilterRef, Message};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Action
// ============================================================================

/// An action that records the options of every run.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingAction::<FieldValue>::new();
/// let handle = recorder.handle();
/// bus.add_action("submit", &handle, DEFAULT_PRIORITY);
///
/// host.submit()?;
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingAction<V: Clone> {
    calls: Arc<Mutex<Vec<V>>>,
}

impl<V: Message + Clone> RecordingAction<V> {
    /// Create a new recording action.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A registrable handle sharing this recorder's log.
    ///
    /// Every call returns a handle with a new identity; keep the one you
    /// register if you intend to remove it later.
    pub fn handle(&self) -> ActionRef<V> {
        Callback::from_action(self.clone())
    }

    /// Get a clone of the recorded options.
    pub fn calls(&self) -> Vec<V> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded runs.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded runs.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl<V: Message + Clone> Default for RecordingAction<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for RecordingAction<V> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<V: Message + Clone> Action<V> for RecordingAction<V> {
    fn run(&self, options: &V) -> Result<(), BoxError> {
        self.calls.lock().unwrap().push(options.clone());
        Ok(())
    }
}

// ============================================================================
// Recording Filter
// ============================================================================

/// A filter that records each value it sees and returns it unchanged.
pub struct RecordingFilter<V: Clone> {
    values: Arc<Mutex<Vec<V>>>,
}

impl<V: Message + Clone> RecordingFilter<V> {
    /// Create a new recording filter.
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A registrable handle sharing this recorder's log.
    pub fn handle(&self) -> FilterRef<V> {
        Callback::from_filter(self.clone())
    }

    /// Get a clone of the recorded values.
    pub fn values(&self) -> Vec<V> {
        self.values.lock().unwrap().clone()
    }

    /// Get the number of times the filter ran.
    pub fn count(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

impl<V: Message + Clone> Default for RecordingFilter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for RecordingFilter<V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<V: Message + Clone> Filter<V> for RecordingFilter<V> {
    fn apply(&self, value: V, _options: &V) -> Result<V, BoxError> {
        self.values.lock().unwrap().push(value.clone());
        Ok(value)
    }
}

// ============================================================================
// Failing Filter
// ============================================================================

/// A filter that always returns an error with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingFilter {
    message: String,
}

impl FailingFilter {
    /// Create a failing filter.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<V: Message> Filter<V> for FailingFilter {
    fn apply(&self, _value: V, _options: &V) -> Result<V, BoxError> {
        Err(self.message.clone().into())
    }
}
