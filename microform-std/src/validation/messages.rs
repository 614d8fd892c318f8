//! Message templates for failed rules.

use microform_core::FieldValue;
use std::{collections::HashMap, fmt, sync::Arc};

/// Message returned when no template matches a failed rule.
pub const FALLBACK_MESSAGE: &str = "Invalid.";

static DEFAULT_MESSAGES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "required" => "{name} is required.",
    "min" => "{name} must be greater than {min}.",
    "max" => "{name} must be less than {max}.",
    "number" => "{name} must be a valid number.",
    "date" => "{name} must be a valid date.",
    "integer" => "{name} must be a valid integer.",
    "email" => "{name} must be a valid email.",
};

/// What a message template gets to see about a failed rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The value that failed.
    pub value: &'a FieldValue,
    /// The field's display name.
    pub name: &'a str,
    /// The rule name.
    pub rule: &'a str,
    /// The rule argument.
    pub arg: Option<&'a str>,
}

impl RuleContext<'_> {
    /// Fills `{name}`, `{value}`, `{arg}` and `{<rule>}` placeholders.
    ///
    /// Unknown placeholders are left in place.
    pub fn interpolate(&self, template: &str) -> String {
        let arg = self.arg.unwrap_or_default();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            match key {
                "name" => out.push_str(self.name),
                "value" => out.push_str(&self.value.to_string()),
                "arg" => out.push_str(arg),
                k if k == self.rule => out.push_str(arg),
                _ => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

type RenderFn = dyn Fn(&RuleContext<'_>) -> String + Send + Sync;

/// A message: a template string or a function of the failed rule.
#[derive(Clone)]
pub enum MessageTemplate {
    /// A string with placeholders.
    Text(String),
    /// A function producing the message.
    Render(Arc<RenderFn>),
}

impl MessageTemplate {
    /// Wraps a message function.
    pub fn render<F>(f: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> String + Send + Sync + 'static,
    {
        MessageTemplate::Render(Arc::new(f))
    }

    /// Produces the message for `ctx`.
    pub fn format(&self, ctx: &RuleContext<'_>) -> String {
        match self {
            MessageTemplate::Text(template) => ctx.interpolate(template),
            MessageTemplate::Render(f) => f(ctx),
        }
    }
}

impl fmt::Debug for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTemplate::Text(t) => f.debug_tuple("Text").field(t).finish(),
            MessageTemplate::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for MessageTemplate {
    fn from(s: &str) -> Self {
        MessageTemplate::Text(s.to_string())
    }
}

impl From<String> for MessageTemplate {
    fn from(s: String) -> Self {
        MessageTemplate::Text(s)
    }
}

/// Local messages keyed by rule name or by `"<rule>:<field>"`.
#[derive(Debug, Clone)]
pub struct MessageTable {
    entries: HashMap<String, MessageTemplate>,
}

impl MessageTable {
    /// A table holding the built-in messages.
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_MESSAGES
                .entries()
                .map(|(rule, template)| ((*rule).to_string(), MessageTemplate::from(*template)))
                .collect(),
        }
    }

    /// A table without any messages.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces the message for `key`.
    pub fn with(mut self, key: impl Into<String>, message: impl Into<MessageTemplate>) -> Self {
        self.insert(key, message);
        self
    }

    /// Adds or replaces the message for `key`.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<MessageTemplate>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Removes the message for `key`.
    pub fn remove(&mut self, key: &str) -> Option<MessageTemplate> {
        self.entries.remove(key)
    }

    /// Copies every entry of `other` over this table.
    pub fn extend(&mut self, other: impl IntoIterator<Item = (String, MessageTemplate)>) {
        self.entries.extend(other);
    }

    /// The message for `key`.
    pub fn get(&self, key: &str) -> Option<&MessageTemplate> {
        self.entries.get(key)
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::new()
    }
}
