//! Rule strings and their compiled form.
//!
//! ```text
//! rulespec := rule ("|" rule)*
//! rule     := NAME (":" ARG)?
//! ```
//!
//! There is no escaping and no whitespace trimming. Unknown names compile
//! like any other; whether a name means anything is decided at evaluation.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// One compiled rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    /// The rule name, e.g. `min`.
    pub name: String,
    /// The argument after the colon, e.g. `5`.
    pub arg: Option<String>,
}

impl CompiledRule {
    /// Builds a rule without an argument.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
        }
    }

    /// Builds a rule with an argument.
    pub fn with_arg(name: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: Some(arg.into()),
        }
    }

    /// Parses a single `NAME` or `NAME:ARG` segment.
    ///
    /// With more than one colon, the argument is the text between the first
    /// and the second colon.
    pub fn parse(segment: &str) -> Self {
        let mut parts = segment.split(':');
        let name = parts.next().unwrap_or_default();
        match parts.next() {
            Some(arg) => Self::with_arg(name, arg),
            None => Self::bare(name),
        }
    }
}

/// Compiles a rule string into its rules, in source order.
pub fn compile(spec: &str) -> Vec<CompiledRule> {
    spec.split('|').map(CompiledRule::parse).collect()
}

/// Rule strings keyed by field name.
///
/// Deserializing skips fields whose rule value is not a string, which leaves
/// those fields with no rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules(BTreeMap<String, String>);

impl Rules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule string for `field`.
    pub fn with(mut self, field: impl Into<String>, spec: impl Into<String>) -> Self {
        self.insert(field, spec);
        self
    }

    /// Adds or replaces the rule string for `field`.
    pub fn insert(&mut self, field: impl Into<String>, spec: impl Into<String>) {
        self.0.insert(field.into(), spec.into());
    }

    /// The rule string for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if no field has a rule string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field, rule string)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Compiles every field's rule string.
    pub fn compile(&self) -> CompiledRules {
        CompiledRules(
            self.0
                .iter()
                .map(|(field, spec)| (field.clone(), compile(spec)))
                .collect(),
        )
    }
}

impl<K: Into<String>, S: Into<String>> FromIterator<(K, S)> for Rules {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Rules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(field, value)| match value {
                    serde_json::Value::String(spec) => Some((field, spec)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

/// Compiled rules keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRules(BTreeMap<String, Vec<CompiledRule>>);

impl CompiledRules {
    /// The compiled rules of `field`, empty when it has none.
    pub fn field(&self, field: &str) -> &[CompiledRule] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over `(field, rules)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CompiledRule])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
