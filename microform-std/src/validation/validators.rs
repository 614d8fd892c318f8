//! Built-in validators.
//!
//! The rule set is closed: names are looked up in a compile-time table and
//! anything not in it is ignored by the engine.

use microform_core::FieldValue;
use regex::Regex;
use std::sync::LazyLock;

/// A built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Value is not empty.
    Required,
    /// Value is a number at least the argument.
    Min,
    /// Value is a number at most the argument.
    Max,
    /// Value is a finite number.
    Number,
    /// Value is a number without a fractional part.
    Integer,
    /// Value is a date.
    Date,
    /// Value is an email address.
    Email,
}

static RULES: phf::Map<&'static str, RuleKind> = phf::phf_map! {
    "required" => RuleKind::Required,
    "min" => RuleKind::Min,
    "max" => RuleKind::Max,
    "number" => RuleKind::Number,
    "integer" => RuleKind::Integer,
    "date" => RuleKind::Date,
    "email" => RuleKind::Email,
};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i-u)^(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
        r#"|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")"#,
        r#"@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?"#,
        r#"|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}"#,
        r#"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?"#,
        r#"|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"#,
    ))
    .expect("email pattern is valid")
});

impl RuleKind {
    /// Looks a rule up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        RULES.get(name).copied()
    }

    /// The rule's name.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Number => "number",
            RuleKind::Integer => "integer",
            RuleKind::Date => "date",
            RuleKind::Email => "email",
        }
    }

    /// Returns `true` if `value` passes the rule.
    pub fn check(self, value: &FieldValue, arg: Option<&str>) -> bool {
        match self {
            RuleKind::Required => !value.is_empty(),
            RuleKind::Min => compare(value, arg, |v, bound| v >= bound),
            RuleKind::Max => compare(value, arg, |v, bound| v <= bound),
            RuleKind::Number => value.as_number().is_some(),
            RuleKind::Integer => value.as_number().is_some_and(|n| n.fract() == 0.0),
            RuleKind::Date => value.as_date().is_some(),
            RuleKind::Email => is_email(value),
        }
    }
}

fn compare(value: &FieldValue, arg: Option<&str>, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (value.as_number(), arg.and_then(coerce_number)) {
        (Some(v), Some(bound)) => cmp(v, bound),
        _ => false,
    }
}

/// Reads a rule argument as a number.
///
/// Surrounding whitespace is ignored and a blank argument reads as zero.
pub fn coerce_number(arg: &str) -> Option<f64> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Returns `true` if `value` is text shaped like an email address.
pub fn is_email(value: &FieldValue) -> bool {
    value.as_str().is_some_and(|s| EMAIL.is_match(s))
}
