//! Dynamic field values.
//!
//! [`FieldValue`] is what flows through the hook bus: field values, filter
//! options such as `{name, value}`, and whole form payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Keyed mapping of field values.
pub type ValueMap = BTreeMap<String, FieldValue>;

/// A lazily computed value.
///
/// Two thunks are equal only if they are the same shared closure.
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() -> FieldValue + Send + Sync>);

impl Thunk {
    /// Wraps a closure producing a value on demand.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluates the closure.
    pub fn call(&self) -> FieldValue {
        (self.0)()
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// A dynamically typed form value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Not necessarily finite.
    Number(f64),
    /// A string.
    Text(String),
    /// An ordered list of values.
    List(Vec<FieldValue>),
    /// A calendar date.
    Date(NaiveDate),
    /// A keyed mapping.
    Map(ValueMap),
    /// A value computed on demand.
    Computed(Thunk),
}

impl FieldValue {
    /// Builds a text value.
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Builds a map value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        FieldValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a computed value.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        FieldValue::Computed(Thunk::new(f))
    }

    /// Returns `true` if the value counts as empty.
    ///
    /// Null is empty, text is empty when it is all whitespace, lists and
    /// maps are empty when they have no entries. Numbers, booleans, dates
    /// and computed values are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.chars().all(char::is_whitespace),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(map) => map.is_empty(),
            FieldValue::Bool(_)
            | FieldValue::Number(_)
            | FieldValue::Date(_)
            | FieldValue::Computed(_) => false,
        }
    }

    /// Returns `true` for null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the number if this is a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date if this is a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the list if this is a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map if this is a map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the mutable map if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Resolves computed values, leaving every other value as is.
    pub fn resolve(&self) -> FieldValue {
        match self {
            FieldValue::Computed(thunk) => thunk.call(),
            other => other.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            FieldValue::Map(_) => f.write_str("[object]"),
            FieldValue::Computed(thunk) => write!(f, "{}", thunk.call()),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl From<ValueMap> for FieldValue {
    fn from(map: ValueMap) -> Self {
        FieldValue::Map(map)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FieldValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            FieldValue::Computed(thunk) => thunk.call().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn emptiness_boundaries() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(FieldValue::text("").is_empty());
        assert!(!FieldValue::text(" a ").is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::List(vec![FieldValue::Null]).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(FieldValue::Map(ValueMap::new()).is_empty());
        assert!(!FieldValue::map([("a", FieldValue::from(1))]).is_empty());
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert!(!FieldValue::Date(today).is_empty());
        assert!(!FieldValue::computed(|| FieldValue::Null).is_empty());
    }

    #[test]
    fn as_number_rejects_non_finite() {
        assert_eq!(FieldValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::Number(f64::INFINITY).as_number(), None);
        assert_eq!(FieldValue::text("3").as_number(), None);
    }

    #[test]
    fn converts_from_json() {
        let value = FieldValue::from(json!({"age": 3, "tags": ["a"], "ok": true, "none": null}));
        assert_eq!(
            value,
            FieldValue::map([
                ("age", FieldValue::Number(3.0)),
                ("none", FieldValue::Null),
                ("ok", FieldValue::Bool(true)),
                ("tags", FieldValue::List(vec![FieldValue::text("a")])),
            ])
        );
    }

    #[test]
    fn serializes_dates_and_thunks() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let value = FieldValue::map([
            ("when", FieldValue::Date(date)),
            ("lazy", FieldValue::computed(|| FieldValue::text("x"))),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!({"lazy": "x", "when": "2020-02-29"}));
    }

    #[test]
    fn display_matches_message_interpolation() {
        assert_eq!(FieldValue::Number(5.0).to_string(), "5");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(
            FieldValue::List(vec!["a".into(), "b".into()]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn thunks_compare_by_identity() {
        let a = Thunk::new(|| FieldValue::Null);
        let b = Thunk::new(|| FieldValue::Null);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
