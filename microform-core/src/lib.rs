//! # microform-core
//!
//! Core traits and data model for the Microform form toolkit.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! capabilities and extensions that don't need the `microform-std`
//! implementations.
//!
//! # Building Blocks
//!
//! ## Callbacks ([`Action`], [`Filter`])
//!
//! The two interception styles of the hook bus. Actions observe a tag and
//! return nothing; filters receive a value and hand back the next one, so
//! the filters of one tag compose as a fold. [`Callback`] handles give
//! callbacks an identity, which is what removal matches on.
//!
//! ## Values ([`FieldValue`], [`FormData`])
//!
//! The dynamic value model carried through the bus: field values, filter
//! options and whole payloads.
//!
//! ## Rules ([`Rules`], [`CompiledRule`])
//!
//! The pipe-delimited rule grammar attached to each field and its compiled
//! form. Evaluating rules is the job of `microform-std`.
//!
//! ## Definitions ([`FormDefinition`])
//!
//! The JSON form definition: field names, labels and defaults.
//!
//! # Error Types
//!
//! - [`MicroformError`] - Top-level error type
//! - [`HookError`] - Callback failures during dispatch
//! - [`DefinitionError`] - Unreadable form definitions

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod data;
mod definition;
mod error;
mod hook;
mod message;
mod rule;
mod value;

// Re-exports
pub use data::{ERRORS_KEY, FormData, ValidationErrors};
pub use definition::{FieldDefinition, FieldKind, FieldOption, FormDefinition};
pub use error::{BoxError, DefinitionError, HookError, MicroformError};
pub use hook::{Action, ActionRef, Callback, DEFAULT_PRIORITY, Filter, FilterRef};
pub use message::Message;
pub use rule::{CompiledRule, CompiledRules, Rules, compile};
pub use value::{FieldValue, Thunk, ValueMap};
