//! Rule-based validation.
//!
//! - [`validators`]: the built-in rules
//! - [`messages`]: message templates and the local message table
//! - [`translations`]: locale-scoped overrides
//! - [`Validator`]: evaluation and message resolution

mod engine;
pub mod messages;
pub mod translations;
pub mod validators;

pub use engine::Validator;
pub use messages::{FALLBACK_MESSAGE, MessageTable, MessageTemplate, RuleContext};
pub use translations::{DEFAULT_LOCALE, Translations};
pub use validators::RuleKind;
