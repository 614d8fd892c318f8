//! The headless form host.
//!
//! A [`FormHost`] owns one hook bus, the current [`FormData`] and the error
//! text of each field. It turns field changes, submits and cancels into
//! filter and action dispatches on its bus. Rendering is left to the caller.

use crate::{
    api::{FormApi, tags},
    capability::Capability,
};
use microform_core::{
    DefinitionError, FieldValue, FormData, FormDefinition, HookError, MicroformError,
    ValidationErrors,
};
use microform_std::bus::HookBus;
use std::{collections::BTreeMap, sync::Arc};

/// Result of [`FormHost::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The payload passed every `submitting` filter; `errors` is stripped.
    Submitted(FormData),
    /// A `submitting` filter attached errors; nothing was emitted.
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    /// Returns `true` for [`SubmitOutcome::Submitted`].
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Label, hint and placeholder of a field after translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldText {
    /// Display label.
    pub label: Option<String>,
    /// Help text.
    pub hint: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

/// Form-level texts after translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormText {
    /// Form title.
    pub title: Option<String>,
    /// Form description.
    pub description: Option<String>,
    /// Submit button text.
    pub submit_text: String,
    /// Cancel button text.
    pub cancel_text: String,
}

/// One form's data, errors and hook bus.
///
/// # Example
///
/// ```rust
/// use microform::{FormHost, SubmitOutcome, Validation};
/// use microform_core::Rules;
///
/// let mut host = FormHost::from_json(
///     r#"{"id": "signup", "fields": [{"name": "email", "label": "Email"}]}"#,
/// ).unwrap();
/// let validation = Validation::new(Rules::new().with("email", "required|email"))
///     .with_definition(host.definition().clone());
/// host.connect(&[&validation]).unwrap();
///
/// assert_eq!(host.change("email", "nope").unwrap(), Some("Email must be a valid email."));
/// assert!(!host.submit().unwrap().is_submitted());
///
/// host.change("email", "me@example.com").unwrap();
/// assert!(host.submit().unwrap().is_submitted());
/// ```
pub struct FormHost {
    definition: Arc<FormDefinition>,
    bus: Arc<HookBus<FieldValue>>,
    scope: Option<String>,
    data: FormData,
    errors: BTreeMap<String, String>,
}

impl FormHost {
    /// A host seeded with the definition's default values.
    pub fn new(definition: FormDefinition) -> Self {
        Self::from_shared(Arc::new(definition))
    }

    /// A host over a shared definition.
    pub fn from_shared(definition: Arc<FormDefinition>) -> Self {
        let data = definition.initial_data();
        Self {
            definition,
            bus: Arc::new(HookBus::new()),
            scope: None,
            data,
            errors: BTreeMap::new(),
        }
    }

    /// Parses a JSON definition and builds a host over it.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        FormDefinition::from_json(json).map(Self::new)
    }

    /// Sets the scope reported in lifecycle events.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// The form definition.
    pub fn definition(&self) -> &Arc<FormDefinition> {
        &self.definition
    }

    /// The scope, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Registration entry points for this form's bus.
    pub fn api(&self) -> FormApi {
        FormApi::new(self.bus.clone())
    }

    /// The current field values.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// The error text of `field`, if it has one.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Every field with error text.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attaches `capabilities`, then emits [`FormEvent::Connected`](crate::FormEvent::Connected).
    pub fn connect(&self, capabilities: &[&dyn Capability]) -> Result<(), MicroformError> {
        let api = self.api();
        for capability in capabilities {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = capability.name(), "attaching capability");
            capability.attach(&api)?;
        }
        self.bus.run_action(tags::CONNECTED, &self.identity())?;
        Ok(())
    }

    /// Records a new value for `field` and validates it.
    ///
    /// `value` must already be aggregated: a multi-select passes its joined
    /// selection. The `changing` filters may rewrite `newValue`; the
    /// `validating` filters turn `{name, value}` into the field's error text.
    /// Returns the error text, if any.
    pub fn change(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Option<&str>, HookError> {
        let value = value.into();
        let old = self.data.get(field).cloned().unwrap_or_default();

        let proposal = FieldValue::map([
            ("name", FieldValue::text(field)),
            ("oldValue", old),
            ("newValue", value.clone()),
        ]);
        let changed = self
            .bus
            .apply_filters(tags::CHANGING, proposal, &self.data.to_value())?;
        let value = changed.get("newValue").cloned().unwrap_or(value);
        self.data.set(field, value.clone());

        let verdict = self.bus.apply_filters(
            tags::VALIDATING,
            FieldValue::map([("name", FieldValue::text(field)), ("value", value.clone())]),
            &FieldValue::Null,
        )?;
        let error = match verdict {
            FieldValue::Text(text) => text,
            _ => String::new(),
        };
        self.set_error(field, &error);

        self.bus.run_action(
            tags::CHANGE,
            &FieldValue::map([
                ("name", FieldValue::text(field)),
                ("value", value),
                ("error", FieldValue::Text(error)),
            ]),
        )?;
        Ok(self.field_error(field))
    }

    /// Runs the `submitting` filters over the current data.
    ///
    /// A non-empty `errors` map in the result rejects the submit and becomes
    /// the fields' error text. Otherwise the payload is stripped of `errors`
    /// and emitted as [`FormEvent::Submitted`](crate::FormEvent::Submitted).
    pub fn submit(&mut self) -> Result<SubmitOutcome, HookError> {
        self.data.strip_errors();
        let filtered = self
            .bus
            .apply_filters(tags::SUBMITTING, self.data.to_value(), &FieldValue::Null)?;
        let mut payload = FormData::from_value(filtered).unwrap_or_else(|| self.data.clone());

        if let Some(errors) = payload.errors() {
            #[cfg(feature = "tracing")]
            tracing::debug!(failed_fields = errors.len(), "submit rejected");
            for (field, messages) in errors.iter() {
                self.set_error(field, &messages.join(" "));
            }
            return Ok(SubmitOutcome::Rejected(errors));
        }

        payload.strip_errors();
        self.errors.clear();
        let mut event = self.identity();
        if let Some(map) = event.as_map_mut() {
            map.remove("id");
            map.insert("data".to_string(), payload.to_value());
        }
        self.bus.run_action(tags::SUBMIT, &event)?;
        Ok(SubmitOutcome::Submitted(payload))
    }

    /// Emits [`FormEvent::Cancelled`](crate::FormEvent::Cancelled).
    pub fn cancel(&self) -> Result<(), HookError> {
        self.bus.run_action(tags::CANCEL, &self.identity())
    }

    /// Restores the default values and clears every error.
    pub fn reset(&mut self) {
        self.data = self.definition.initial_data();
        self.errors.clear();
    }

    /// The translated texts of `field`, or `None` for an unknown field.
    pub fn field_text(&self, field: &str) -> Result<Option<FieldText>, HookError> {
        let Some(def) = self.definition.field(field) else {
            return Ok(None);
        };
        let texts = self.bus.apply_filters(
            tags::TRANSLATING_FIELD,
            FieldValue::map([
                ("name", FieldValue::text(&def.name)),
                ("label", def.label.clone().into()),
                ("hint", def.hint.clone().into()),
                ("placeholder", def.placeholder.clone().into()),
            ]),
            &FieldValue::Null,
        )?;
        Ok(Some(FieldText {
            label: text_of(&texts, "label"),
            hint: text_of(&texts, "hint"),
            placeholder: text_of(&texts, "placeholder"),
        }))
    }

    /// The translated title, description and button texts.
    pub fn form_text(&self) -> Result<FormText, HookError> {
        let def = &self.definition;
        let title = self.bus.apply_filters(
            tags::TRANSLATING_TITLE,
            FieldValue::map([
                ("title", def.title.clone().into()),
                ("description", def.description.clone().into()),
            ]),
            &FieldValue::Null,
        )?;
        let actions = self.bus.apply_filters(
            tags::TRANSLATING_ACTIONS,
            FieldValue::map([
                ("submitText", FieldValue::text(&def.submit_text)),
                ("cancelText", FieldValue::text(&def.cancel_text)),
            ]),
            &FieldValue::Null,
        )?;
        Ok(FormText {
            title: text_of(&title, "title"),
            description: text_of(&title, "description"),
            submit_text: text_of(&actions, "submitText").unwrap_or_else(|| def.submit_text.clone()),
            cancel_text: text_of(&actions, "cancelText").unwrap_or_else(|| def.cancel_text.clone()),
        })
    }

    fn set_error(&mut self, field: &str, error: &str) {
        if error.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), error.to_string());
        }
    }

    fn identity(&self) -> FieldValue {
        FieldValue::map([
            ("scope", self.scope.clone().into()),
            ("id", self.definition.id.clone().into()),
        ])
    }
}

fn text_of(value: &FieldValue, key: &str) -> Option<String> {
    value.get(key).and_then(FieldValue::as_str).map(str::to_string)
}
