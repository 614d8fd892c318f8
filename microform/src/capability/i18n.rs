use super::{Capability, Validation};
use crate::api::{FormApi, TranslationTarget};
use microform_core::{BoxError, Callback, FieldValue, FilterRef, MicroformError};
use microform_std::validation::Translations;
use parking_lot::RwLock;
use std::sync::Arc;

/// Translates field and form texts from locale tables.
///
/// Each text is looked up by its key first (`"<field>:label"`,
/// `"<field>:hint"`, `"<field>:placeholder"`, `"actions:submit"`,
/// `"actions:cancel"`, `"form:title"`, `"form:description"`), then by its
/// literal text; untranslated texts are kept as they are.
///
/// With [`Translation::with_locale_field`] the active locale follows the
/// value of a form field. Validations linked through
/// [`Translation::with_validation`] switch locale along with it.
#[derive(Clone)]
pub struct Translation {
    translations: Arc<RwLock<Translations>>,
    locale_field: Option<String>,
    linked: Vec<Validation>,
}

impl Translation {
    /// Translation from `translations`, starting in their active locale.
    pub fn new(translations: Translations) -> Self {
        Self {
            translations: Arc::new(RwLock::new(translations)),
            locale_field: None,
            linked: Vec::new(),
        }
    }

    /// Keeps the message locale of `validation` in step with this one.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        validation.set_locale(self.locale());
        self.linked.push(validation);
        self
    }

    /// Switches locale whenever `field` changes.
    pub fn with_locale_field(mut self, field: impl Into<String>) -> Self {
        self.locale_field = Some(field.into());
        self
    }

    /// Selects the active locale.
    pub fn set_locale(&self, locale: impl Into<String>) {
        let locale = locale.into();
        for validation in &self.linked {
            validation.set_locale(locale.as_str());
        }
        self.translations.write().set_locale(locale);
    }

    /// The active locale.
    pub fn locale(&self) -> String {
        self.translations.read().locale().to_string()
    }

    /// Looks `key` up in the active locale.
    pub fn translate(&self, key: &str) -> Option<String> {
        self.translations.read().translate(key).map(str::to_string)
    }

    /// The filter for `target`.
    pub fn filter(&self, target: TranslationTarget) -> FilterRef<FieldValue> {
        let translations = self.translations.clone();
        Callback::filter(move |mut texts: FieldValue, _: &FieldValue| -> Result<FieldValue, BoxError> {
            let table = translations.read();
            let prefix = match target {
                TranslationTarget::Field => texts
                    .get("name")
                    .and_then(FieldValue::as_str)
                    .unwrap_or_default()
                    .to_string(),
                TranslationTarget::Actions => "actions".to_string(),
                TranslationTarget::Title => "form".to_string(),
            };
            let Some(map) = texts.as_map_mut() else {
                return Ok(texts);
            };
            for (slot, key) in slots(target) {
                let literal = map.get(*slot).and_then(FieldValue::as_str);
                let translated = table
                    .translate(&format!("{prefix}:{key}"))
                    .or_else(|| literal.and_then(|text| table.translate(text)))
                    .map(str::to_string);
                if let Some(text) = translated {
                    map.insert((*slot).to_string(), FieldValue::Text(text));
                }
            }
            Ok(texts)
        })
    }

    fn locale_filter(&self, field: String) -> FilterRef<FieldValue> {
        let this = self.clone();
        Callback::filter(move |change: FieldValue, _: &FieldValue| -> Result<FieldValue, BoxError> {
            if change.get("name").and_then(FieldValue::as_str) == Some(field.as_str()) {
                if let Some(locale) = change.get("newValue").and_then(FieldValue::as_str) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(locale, "switching locale");
                    this.set_locale(locale);
                }
            }
            Ok(change)
        })
    }
}

/// Text slots of each target and the key suffix they translate under.
fn slots(target: TranslationTarget) -> &'static [(&'static str, &'static str)] {
    match target {
        TranslationTarget::Field => &[("label", "label"), ("hint", "hint"), ("placeholder", "placeholder")],
        TranslationTarget::Actions => &[("submitText", "submit"), ("cancelText", "cancel")],
        TranslationTarget::Title => &[("title", "title"), ("description", "description")],
    }
}

impl Capability for Translation {
    fn name(&self) -> &'static str {
        "translation"
    }

    fn attach(&self, api: &FormApi) -> Result<(), MicroformError> {
        if self.translations.read().is_empty() {
            return Ok(());
        }
        for target in [
            TranslationTarget::Field,
            TranslationTarget::Actions,
            TranslationTarget::Title,
        ] {
            api.translating(target, &self.filter(target));
        }
        if let Some(field) = &self.locale_field {
            api.changing(&self.locale_filter(field.clone()));
        }
        Ok(())
    }
}
