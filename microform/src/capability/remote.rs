use super::{Capability, Translation, Validation};
use crate::{api::FormApi, host::FormHost};
use microform_core::{DefinitionError, FormDefinition, MicroformError, Rules};
use microform_std::validation::{MessageTable, MessageTemplate, Translations, Validator};
use serde_json::Value;
use std::sync::Arc;

/// Scope given to hosts built from a bundle that names none.
pub const DEFAULT_REMOTE_SCOPE: &str = "remote";

/// A form shipped as one JSON bundle.
///
/// The bundle is a form definition with extra top-level keys:
///
/// - `validations`: rule strings keyed by field name
/// - `messages`: local messages merged over the built-in ones
/// - `translations`: `{locale: {key: text}}` tables
/// - `locale`: the locale to start in
/// - `scope`: the scope reported by the form's events
///
/// Every extra key is optional. Fetching the bundle is up to the caller.
///
/// Attached as a capability, the bundle registers one [`Validation`] and one
/// [`Translation`] that share the active locale, so a locale picker set up
/// with [`RemoteDefinition::with_locale_field`] switches labels and messages
/// together.
///
/// # Example
///
/// ```rust
/// use microform::RemoteDefinition;
///
/// let remote = RemoteDefinition::from_json(r#"{
///     "id": "login",
///     "fields": [{"name": "username", "label": "Username"}],
///     "validations": {"username": "required"},
///     "messages": {"required": "Please fill in {name}."}
/// }"#).unwrap();
///
/// let mut host = remote.host();
/// host.connect(&[&remote]).unwrap();
/// assert_eq!(host.change("username", "").unwrap(), Some("Please fill in Username."));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteDefinition {
    definition: Arc<FormDefinition>,
    rules: Rules,
    messages: Vec<(String, String)>,
    translations: Translations,
    scope: String,
    locale_field: Option<String>,
}

impl RemoteDefinition {
    /// Parses a bundle.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Reads a bundle out of an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DefinitionError> {
        let Value::Object(mut bundle) = value else {
            return Err(DefinitionError::Shape("bundle is not an object".to_string()));
        };

        let rules = match bundle.remove("validations") {
            Some(validations) => serde_json::from_value(validations)?,
            None => Rules::new(),
        };
        let messages = match bundle.remove("messages") {
            Some(Value::Object(messages)) => messages
                .into_iter()
                .filter_map(|(key, text)| match text {
                    Value::String(text) => Some((key, text)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let mut translations = bundle
            .remove("translations")
            .map(|tables| Translations::from_json(&tables))
            .unwrap_or_default();
        if let Some(Value::String(locale)) = bundle.remove("locale") {
            translations.set_locale(locale);
        }
        let scope = match bundle.remove("scope") {
            Some(Value::String(scope)) => scope,
            _ => DEFAULT_REMOTE_SCOPE.to_string(),
        };

        let definition = FormDefinition::from_json_value(Value::Object(bundle))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            form = definition.id.as_deref().unwrap_or_default(),
            rules = rules.iter().count(),
            "loaded remote definition"
        );

        Ok(Self {
            definition: Arc::new(definition),
            rules,
            messages,
            translations,
            scope,
            locale_field: None,
        })
    }

    /// Switches locale whenever `field` changes.
    pub fn with_locale_field(mut self, field: impl Into<String>) -> Self {
        self.locale_field = Some(field.into());
        self
    }

    /// The form definition.
    pub fn definition(&self) -> &Arc<FormDefinition> {
        &self.definition
    }

    /// The bundle's rules.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The scope reported by hosts built from this bundle.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// A validator using the bundle's messages, translations and labels.
    pub fn validator(&self) -> Validator {
        let mut messages = MessageTable::new();
        messages.extend(
            self.messages
                .iter()
                .map(|(key, text)| (key.clone(), MessageTemplate::from(text.as_str()))),
        );
        Validator::new()
            .with_messages(messages)
            .with_translations(self.translations.clone())
            .with_definition(self.definition.clone())
    }

    /// Validation of the bundle's rules.
    pub fn validation(&self) -> Validation {
        Validation::with_validator(self.rules.clone(), self.validator())
    }

    /// Translation from the bundle's tables.
    ///
    /// The validation returned by a separate call to
    /// [`RemoteDefinition::validation`] does not follow its locale; link it
    /// with [`Translation::with_validation`].
    pub fn translation(&self) -> Translation {
        let translation = Translation::new(self.translations.clone());
        match &self.locale_field {
            Some(field) => translation.with_locale_field(field.clone()),
            None => translation,
        }
    }

    /// A host over the bundle's definition and scope.
    pub fn host(&self) -> FormHost {
        FormHost::from_shared(self.definition.clone()).with_scope(self.scope.clone())
    }
}

impl Capability for RemoteDefinition {
    fn name(&self) -> &'static str {
        "remote-definition"
    }

    fn attach(&self, api: &FormApi) -> Result<(), MicroformError> {
        let validation = self.validation();
        validation.attach(api)?;
        self.translation().with_validation(validation).attach(api)
    }
}
