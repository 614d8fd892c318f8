//! Form payloads and validation results.

use crate::value::{FieldValue, ValueMap};
use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which validation errors ride along in a submit payload.
pub const ERRORS_KEY: &str = "errors";

/// Current field values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormData(ValueMap);

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `field`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Sets `field`, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Removes `field`, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The errors attached under [`ERRORS_KEY`], if any.
    pub fn errors(&self) -> Option<ValidationErrors> {
        self.0
            .get(ERRORS_KEY)
            .map(ValidationErrors::from_value)
            .filter(|errors| !errors.is_empty())
    }

    /// Merges `errors` into the attached errors; later fields replace
    /// earlier ones.
    pub fn attach_errors(&mut self, errors: &ValidationErrors) {
        let mut merged = self
            .0
            .get(ERRORS_KEY)
            .map(ValidationErrors::from_value)
            .unwrap_or_default();
        merged.merge(errors);
        self.0.insert(ERRORS_KEY.to_string(), merged.to_value());
    }

    /// Removes the transient errors entry.
    pub fn strip_errors(&mut self) -> Option<FieldValue> {
        self.0.remove(ERRORS_KEY)
    }

    /// Reads form data out of a map value.
    pub fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Map(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The data as a map value.
    pub fn to_value(&self) -> FieldValue {
        FieldValue::Map(self.0.clone())
    }
}

impl From<FormData> for FieldValue {
    fn from(data: FormData) -> Self {
        FieldValue::Map(data.0)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Failed fields and their messages, in rule order.
///
/// A field is present only if at least one of its rules failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// The messages for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The messages for `field` joined by a space.
    pub fn joined(&self, field: &str) -> Option<String> {
        self.0.get(field).map(|messages| messages.join(" "))
    }

    /// Returns `true` if every rule passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Copies every field of `other` over this one.
    pub fn merge(&mut self, other: &ValidationErrors) {
        for (field, messages) in &other.0 {
            self.0.insert(field.clone(), messages.clone());
        }
    }

    /// Encodes the result as a map of message lists.
    pub fn to_value(&self) -> FieldValue {
        FieldValue::Map(
            self.0
                .iter()
                .map(|(field, messages)| {
                    let list = messages.iter().cloned().map(FieldValue::Text).collect();
                    (field.clone(), FieldValue::List(list))
                })
                .collect(),
        )
    }

    /// Decodes a map of messages or message lists.
    ///
    /// Anything other than a map decodes as empty.
    pub fn from_value(value: &FieldValue) -> Self {
        let Some(map) = value.as_map() else {
            return Self::default();
        };
        Self(
            map.iter()
                .map(|(field, messages)| {
                    let messages = match messages {
                        FieldValue::List(items) => items.iter().map(ToString::to_string).collect(),
                        other => vec![other.to_string()],
                    };
                    (field.clone(), messages)
                })
                .collect(),
        )
    }
}
