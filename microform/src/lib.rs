//! # microform - Headless Form Toolkit
//!
//! `microform` keeps a form's data and errors, routes every change and
//! submit through a per-form hook bus, and lets capabilities such as
//! validation and translation plug in by registering filters on that bus.
//! Rendering is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use microform::prelude::*;
//!
//! let mut host = FormHost::from_json(r#"{
//!     "id": "signup",
//!     "fields": [
//!         {"name": "name", "label": "Name"},
//!         {"name": "age", "type": "number", "label": "Age"}
//!     ]
//! }"#).unwrap();
//!
//! let validation = Validation::new(Rules::new().with("name", "required").with("age", "number|min:18"))
//!     .with_definition(host.definition().clone());
//! host.connect(&[&validation]).unwrap();
//!
//! host.change("name", "Ada").unwrap();
//! host.change("age", 12.0).unwrap();
//! assert_eq!(host.field_error("age"), Some("Age must be greater than 18."));
//!
//! match host.submit().unwrap() {
//!     SubmitOutcome::Rejected(errors) => assert_eq!(errors.len(), 1),
//!     SubmitOutcome::Submitted(_) => unreachable!(),
//! }
//! ```
//!
//! ## Layers
//!
//! - `microform-core`: callback traits, the value model, rules and definitions
//! - `microform-std`: the hook bus, the validator and testing helpers
//! - `microform`: the form host and its capabilities

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod api;
pub mod capability;
mod host;

pub use api::{FormApi, FormEvent, TranslationTarget, tags};
pub use capability::{Capability, RemoteDefinition, Translation, Validation};
pub use host::{FieldText, FormHost, FormText, SubmitOutcome};

pub use microform_core::{
    // Callbacks
    Action,
    ActionRef,
    // Errors
    BoxError,
    Callback,
    CompiledRule,
    DEFAULT_PRIORITY,
    DefinitionError,
    ERRORS_KEY,
    // Definitions
    FieldDefinition,
    FieldKind,
    FieldOption,
    // Values
    FieldValue,
    Filter,
    FilterRef,
    FormData,
    FormDefinition,
    HookError,
    Message,
    MicroformError,
    // Rules
    Rules,
    ValidationErrors,
    compile,
};

/// The hook bus.
pub mod bus {
    pub use microform_std::bus::{HookBus, HookTable};
}

/// Rule evaluation, messages and translations.
pub mod validation {
    pub use microform_std::validation::{
        DEFAULT_LOCALE, FALLBACK_MESSAGE, MessageTable, MessageTemplate, RuleContext, RuleKind,
        Translations, Validator,
    };
}

/// Standard hook implementations.
pub mod hooks {
    pub use microform_std::hooks::LoggingAction;
}

/// Testing utilities.
pub mod testing {
    pub use microform_std::testing::{FailingFilter, RecordingAction, RecordingFilter};
}

/// Prelude module - common imports for Microform.
///
/// # Usage
///
/// ```rust
/// use microform::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Callback, Capability, FieldValue, FormData, FormDefinition, FormEvent, FormHost,
        MicroformError, RemoteDefinition, Rules, SubmitOutcome, Translation, TranslationTarget,
        Validation, ValidationErrors,
    };
}
