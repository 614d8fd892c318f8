//! Error types for Microform.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MicroformError`] - Top-level error type for all Microform operations
//! - [`HookError`] - Errors raised by action and filter callbacks
//! - [`DefinitionError`] - Errors while reading form definitions
//!
//! Validation failures are not errors. They are reported as
//! [`ValidationErrors`](crate::ValidationErrors) values.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// This is the error type returned by action and filter callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Microform operations.
#[derive(Error, Debug)]
pub enum MicroformError {
    /// A hook callback failed.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A form definition could not be read.
    #[error("definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while dispatching on the hook bus.
///
/// The bus never isolates callbacks: the first failure aborts the rest of
/// the chain and surfaces here.
#[derive(Error, Debug)]
pub enum HookError {
    /// A registered callback returned an error.
    #[error("callback for `{tag}` failed: {source}")]
    Callback {
        /// The tag being dispatched.
        tag: String,
        /// The error returned by the callback.
        #[source]
        source: BoxError,
    },
}

impl HookError {
    /// Wraps a callback failure for `tag`.
    pub fn callback(tag: impl Into<String>, source: BoxError) -> Self {
        HookError::Callback {
            tag: tag.into(),
            source,
        }
    }

    /// The tag whose dispatch failed.
    pub fn tag(&self) -> &str {
        match self {
            HookError::Callback { tag, .. } => tag,
        }
    }
}

/// Errors that can occur while reading a form definition.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The document is not valid JSON or does not match the definition shape.
    #[error("invalid definition json: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but is structurally unusable.
    #[error("invalid definition: {0}")]
    Shape(String),
}

// Convenience conversions
impl From<BoxError> for MicroformError {
    fn from(err: BoxError) -> Self {
        MicroformError::Custom(err)
    }
}
