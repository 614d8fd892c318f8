use super::Capability;
use crate::api::FormApi;
use microform_core::{
    BoxError, Callback, FieldValue, FilterRef, FormData, FormDefinition, MicroformError, Rules,
    ValidationErrors,
};
use microform_std::validation::{MessageTemplate, Translations, Validator};
use parking_lot::RwLock;
use std::sync::Arc;

struct State {
    rules: Rules,
    validator: RwLock<Validator>,
}

/// Validates field changes and submits against per-field rules.
///
/// Registers a `submitting` filter that merges failures into the payload's
/// `errors` map, and a `validating` filter that turns `{name, value}` into
/// the field's messages joined with a space. With no rules configured both
/// filters hand their input back untouched.
///
/// Clones share state, so a locale switch through one clone is seen by the
/// filters registered from another.
#[derive(Clone)]
pub struct Validation {
    state: Arc<State>,
}

impl Validation {
    /// Validation of `rules` with the built-in messages.
    pub fn new(rules: Rules) -> Self {
        Self::with_validator(rules, Validator::new())
    }

    /// Validation of `rules` with a preconfigured validator.
    pub fn with_validator(rules: Rules, validator: Validator) -> Self {
        Self {
            state: Arc::new(State {
                rules,
                validator: RwLock::new(validator),
            }),
        }
    }

    /// Adds or replaces one local message.
    pub fn with_message(self, key: impl Into<String>, message: impl Into<MessageTemplate>) -> Self {
        self.state.validator.write().messages_mut().insert(key, message);
        self
    }

    /// Replaces the translation tables used for message overrides.
    pub fn with_translations(self, translations: Translations) -> Self {
        self.update(|v| v.with_translations(translations))
    }

    /// Uses the labels of `definition` in messages.
    pub fn with_definition(self, definition: Arc<FormDefinition>) -> Self {
        self.update(|v| v.with_definition(definition))
    }

    /// The configured rules.
    pub fn rules(&self) -> &Rules {
        &self.state.rules
    }

    /// Selects the locale used for message overrides.
    pub fn set_locale(&self, locale: impl Into<String>) {
        self.state.validator.write().set_locale(locale);
    }

    /// Validates `data` against the configured rules.
    pub fn validate(&self, data: &FormData) -> ValidationErrors {
        self.state.validator.read().validate(data, &self.state.rules)
    }

    /// The `submitting` filter.
    pub fn submitting_filter(&self) -> FilterRef<FieldValue> {
        let state = self.state.clone();
        Callback::filter(move |values: FieldValue, _: &FieldValue| -> Result<FieldValue, BoxError> {
            if state.rules.is_empty() || values.as_map().is_none() {
                return Ok(values);
            }
            let mut data = FormData::from_value(values).unwrap_or_default();
            let errors = state.validator.read().validate(&data, &state.rules);
            if !errors.is_empty() {
                data.attach_errors(&errors);
            }
            Ok(data.into())
        })
    }

    /// The `validating` filter.
    pub fn validating_filter(&self) -> FilterRef<FieldValue> {
        let state = self.state.clone();
        Callback::filter(move |input: FieldValue, _: &FieldValue| -> Result<FieldValue, BoxError> {
            if state.rules.is_empty() {
                return Ok(input);
            }
            let Some(name) = input.get("name").and_then(FieldValue::as_str) else {
                return Ok(FieldValue::text(""));
            };
            let Some(spec) = state.rules.get(name) else {
                return Ok(FieldValue::text(""));
            };
            let null = FieldValue::Null;
            let value = input.get("value").unwrap_or(&null);
            let messages = state.validator.read().validate_field(name, value, spec);
            Ok(FieldValue::Text(messages.join(" ")))
        })
    }

    fn update(self, f: impl FnOnce(Validator) -> Validator) -> Self {
        {
            let mut validator = self.state.validator.write();
            let current = std::mem::take(&mut *validator);
            *validator = f(current);
        }
        self
    }
}

impl Capability for Validation {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn attach(&self, api: &FormApi) -> Result<(), MicroformError> {
        api.submitting(&self.submitting_filter());
        api.validating(&self.validating_filter());
        Ok(())
    }
}
