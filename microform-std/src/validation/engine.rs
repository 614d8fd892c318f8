//! Rule evaluation and message resolution.

use super::{
    messages::{FALLBACK_MESSAGE, MessageTable, MessageTemplate, RuleContext},
    translations::Translations,
    validators::RuleKind,
};
use microform_core::{
    CompiledRule, CompiledRules, FieldValue, FormData, FormDefinition, Rules, ValidationErrors,
    compile,
};
use std::sync::Arc;

/// Evaluates rules against form data and words the failures.
///
/// Every rule of a field runs, even after one has failed, and each failure
/// contributes one message in rule order. For a failed rule the message is
/// the first of:
///
/// 1. the active-locale translation for `"<rule>:<field>"`,
/// 2. the local message for `"<rule>:<field>"`,
/// 3. the local message for `"<rule>"`,
/// 4. [`FALLBACK_MESSAGE`].
///
/// # Example
///
/// ```rust
/// use microform_core::{FieldValue, FormData, Rules};
/// use microform_std::validation::Validator;
///
/// let data: FormData = [("age", FieldValue::Number(3.0))].into_iter().collect();
/// let rules = Rules::new().with("age", "min:5");
///
/// let errors = Validator::new().validate(&data, &rules);
/// assert_eq!(errors.joined("age").as_deref(), Some("age must be greater than 5."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    messages: MessageTable,
    translations: Translations,
    definition: Option<Arc<FormDefinition>>,
}

impl Validator {
    /// A validator with the built-in messages and no translations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the local message table.
    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    /// Adds or replaces one local message.
    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<MessageTemplate>) -> Self {
        self.messages.insert(key, message);
        self
    }

    /// Replaces the translation tables.
    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    /// Attaches a form definition, used for field labels in messages.
    pub fn with_definition(mut self, definition: Arc<FormDefinition>) -> Self {
        self.definition = Some(definition);
        self
    }

    /// The local message table.
    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    /// The local message table, for in-place edits.
    pub fn messages_mut(&mut self) -> &mut MessageTable {
        &mut self.messages
    }

    /// The translation tables.
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Selects the locale used for message overrides.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.translations.set_locale(locale);
    }

    /// Validates `data` against `rules`.
    ///
    /// Fields missing from `data` are checked as null.
    pub fn validate(&self, data: &FormData, rules: &Rules) -> ValidationErrors {
        self.validate_compiled(data, &rules.compile())
    }

    /// Validates `data` against already compiled rules.
    pub fn validate_compiled(&self, data: &FormData, rules: &CompiledRules) -> ValidationErrors {
        let null = FieldValue::Null;
        let mut errors = ValidationErrors::new();
        for (field, field_rules) in rules.iter() {
            let value = data.get(field).unwrap_or(&null);
            for message in self.check(field, value, field_rules) {
                errors.push(field, message);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(failed_fields = errors.len(), "validated form data");
        errors
    }

    /// Validates a single value against a rule string.
    ///
    /// Returns one message per failed rule.
    pub fn validate_field(&self, field: &str, value: &FieldValue, spec: &str) -> Vec<String> {
        self.check(field, value, &compile(spec))
    }

    fn check(&self, field: &str, value: &FieldValue, rules: &[CompiledRule]) -> Vec<String> {
        let value = value.resolve();
        rules
            .iter()
            .filter_map(|rule| {
                let kind = RuleKind::from_name(&rule.name)?;
                if kind.check(&value, rule.arg.as_deref()) {
                    None
                } else {
                    Some(self.message_for(field, rule, &value))
                }
            })
            .collect()
    }

    /// Words the failure of `rule` on `field`.
    pub fn message_for(&self, field: &str, rule: &CompiledRule, value: &FieldValue) -> String {
        let ctx = RuleContext {
            value,
            name: self.display_name(field),
            rule: &rule.name,
            arg: rule.arg.as_deref(),
        };
        let scoped = format!("{}:{field}", rule.name);

        if let Some(text) = self.translations.translate(&scoped) {
            return ctx.interpolate(text);
        }
        self.messages
            .get(&scoped)
            .or_else(|| self.messages.get(&rule.name))
            .map_or_else(|| FALLBACK_MESSAGE.to_string(), |template| template.format(&ctx))
    }

    fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        match &self.definition {
            Some(definition) => definition.display_name(field),
            None => field,
        }
    }
}
