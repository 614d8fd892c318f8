//! Locale-scoped string tables.

use serde_json::Value;
use std::collections::HashMap;

/// Locale used until another one is selected.
pub const DEFAULT_LOCALE: &str = "en";

/// Strings keyed by locale, then by message key.
///
/// Only the active locale is ever consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    locale: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Empty tables with the default locale active.
    pub fn new() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            tables: HashMap::new(),
        }
    }

    /// Selects the active locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Adds a string for `key` in `locale`.
    pub fn with(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(locale, key, text);
        self
    }

    /// Adds a string for `key` in `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, key: impl Into<String>, text: impl Into<String>) {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Selects the active locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The active locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns `true` if no locale has any strings.
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(HashMap::is_empty)
    }

    /// Looks `key` up in the active locale.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.tables
            .get(&self.locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Reads `{locale: {key: text}}` tables, skipping non-string entries.
    pub fn from_json(value: &Value) -> Self {
        let mut translations = Self::new();
        let Some(locales) = value.as_object() else {
            return translations;
        };
        for (locale, table) in locales {
            let Some(table) = table.as_object() else {
                continue;
            };
            for (key, text) in table {
                if let Some(text) = text.as_str() {
                    translations.insert(locale.as_str(), key.as_str(), text);
                }
            }
        }
        translations
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_active_locale_is_consulted() {
        let t = Translations::new()
            .with("en", "required:name", "Name please.")
            .with("de", "required:name", "Name bitte.");
        assert_eq!(t.translate("required:name"), Some("Name please."));

        let t = t.with_locale("de");
        assert_eq!(t.translate("required:name"), Some("Name bitte."));

        let t = t.with_locale("fr");
        assert_eq!(t.translate("required:name"), None);
    }

    #[test]
    fn reads_json_tables() {
        let t = Translations::from_json(&json!({
            "en": {"form:title": "Sign up", "bad": 3},
            "xx": "not a table"
        }));
        assert_eq!(t.translate("form:title"), Some("Sign up"));
        assert_eq!(t.translate("bad"), None);
        assert!(!t.is_empty());
        assert!(Translations::from_json(&json!(null)).is_empty());
    }
}
