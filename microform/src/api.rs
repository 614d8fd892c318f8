//! The narrow interface capabilities use to plug into a form.

use microform_core::{ActionRef, DEFAULT_PRIORITY, FieldValue, FilterRef};
use microform_std::bus::HookBus;
use std::sync::Arc;

/// Bus tags used by a form host.
pub mod tags {
    /// Filter over the whole payload on submit.
    pub const SUBMITTING: &str = "submitting";
    /// Filter from `{name, value}` to the field's error text.
    pub const VALIDATING: &str = "validating";
    /// Filter over `{name, oldValue, newValue}` before a value is stored.
    pub const CHANGING: &str = "changing";
    /// Filter over a field's label, hint and placeholder.
    pub const TRANSLATING_FIELD: &str = "translating:field";
    /// Filter over the submit and cancel texts.
    pub const TRANSLATING_ACTIONS: &str = "translating:actions";
    /// Filter over the form title and description.
    pub const TRANSLATING_TITLE: &str = "translating:title";
    /// Action run once capabilities are attached.
    pub const CONNECTED: &str = "connected";
    /// Action run after a field changed.
    pub const CHANGE: &str = "change";
    /// Action run when the form is cancelled.
    pub const CANCEL: &str = "cancel";
    /// Action run with the clean payload of a successful submit.
    pub const SUBMIT: &str = "submit";
}

/// Lifecycle events a form emits as bus actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// Capabilities attached; options are `{scope, id}`.
    Connected,
    /// A field changed; options are `{name, value, error}`.
    Changed,
    /// The form was cancelled; options are `{scope, id}`.
    Cancelled,
    /// The form was submitted; options are `{scope, data}`.
    Submitted,
}

impl FormEvent {
    /// The bus tag of the event.
    pub fn tag(self) -> &'static str {
        match self {
            FormEvent::Connected => tags::CONNECTED,
            FormEvent::Changed => tags::CHANGE,
            FormEvent::Cancelled => tags::CANCEL,
            FormEvent::Submitted => tags::SUBMIT,
        }
    }
}

/// Which texts a translating filter rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationTarget {
    /// `{name, label, hint, placeholder}` of one field.
    Field,
    /// `{submitText, cancelText}`.
    Actions,
    /// `{title, description}`.
    Title,
}

impl TranslationTarget {
    /// The bus tag of the target.
    pub fn tag(self) -> &'static str {
        match self {
            TranslationTarget::Field => tags::TRANSLATING_FIELD,
            TranslationTarget::Actions => tags::TRANSLATING_ACTIONS,
            TranslationTarget::Title => tags::TRANSLATING_TITLE,
        }
    }
}

/// Registration entry points handed to capabilities.
///
/// Every entry point registers at [`DEFAULT_PRIORITY`]. Keep the handle you
/// pass in if you want to unregister later.
#[derive(Clone)]
pub struct FormApi {
    bus: Arc<HookBus<FieldValue>>,
}

impl FormApi {
    pub(crate) fn new(bus: Arc<HookBus<FieldValue>>) -> Self {
        Self { bus }
    }

    /// Registers a `submitting` filter.
    pub fn submitting(&self, filter: &FilterRef<FieldValue>) {
        self.bus.add_filter(tags::SUBMITTING, filter, DEFAULT_PRIORITY);
    }

    /// Registers a `validating` filter.
    pub fn validating(&self, filter: &FilterRef<FieldValue>) {
        self.bus.add_filter(tags::VALIDATING, filter, DEFAULT_PRIORITY);
    }

    /// Registers a `changing` filter.
    pub fn changing(&self, filter: &FilterRef<FieldValue>) {
        self.bus.add_filter(tags::CHANGING, filter, DEFAULT_PRIORITY);
    }

    /// Registers a translating filter for `target`.
    pub fn translating(&self, target: TranslationTarget, filter: &FilterRef<FieldValue>) {
        self.bus.add_filter(target.tag(), filter, DEFAULT_PRIORITY);
    }

    /// Subscribes to a lifecycle event.
    pub fn on(&self, event: FormEvent, action: &ActionRef<FieldValue>) {
        self.bus.add_action(event.tag(), action, DEFAULT_PRIORITY);
    }

    /// Unsubscribes from a lifecycle event.
    pub fn off(&self, event: FormEvent, action: &ActionRef<FieldValue>) {
        self.bus.remove_action(event.tag(), action);
    }

    /// The underlying bus, for custom tags and priorities.
    pub fn bus(&self) -> &HookBus<FieldValue> {
        &self.bus
    }
}
