//! # microform-std
//!
//! Standard implementations for the Microform form toolkit.
//!
//! This crate provides:
//! - **Hook bus**: [`HookBus`](bus::HookBus), priority-ordered actions and filters
//! - **Validation**: [`Validator`](validation::Validator), built-in rules, messages and translations
//! - **Standard hooks**: Logging
//! - **Testing**: recording and failing callbacks

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use microform_core;

// Modules
pub mod bus;
pub mod hooks;
pub mod testing;
pub mod validation;
