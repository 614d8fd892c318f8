//! JSON form definitions.
//!
//! Only the parts the data side needs are modelled: field names, labels,
//! texts and default values. Presentation-only keys are ignored.

use crate::{data::FormData, error::DefinitionError, value::FieldValue};
use serde::Deserialize;
use std::collections::BTreeMap;

fn default_submit_text() -> String {
    "Submit".to_string()
}

fn default_cancel_text() -> String {
    "Cancel".to_string()
}

fn default_true() -> bool {
    true
}

/// A whole form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Form id, echoed in lifecycle events.
    #[serde(default)]
    pub id: Option<String>,
    /// Form title.
    #[serde(default)]
    pub title: Option<String>,
    /// Form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Top-level fields, sections included.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Submit button text.
    #[serde(default = "default_submit_text")]
    pub submit_text: String,
    /// Cancel button text.
    #[serde(default = "default_cancel_text")]
    pub cancel_text: String,
    /// Whether the form can be cancelled.
    #[serde(default = "default_true")]
    pub cancel: bool,
    /// Class name overrides, keyed by role.
    #[serde(default)]
    pub class_names: BTreeMap<String, String>,
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            fields: Vec::new(),
            submit_text: default_submit_text(),
            cancel_text: default_cancel_text(),
            cancel: true,
            class_names: BTreeMap::new(),
        }
    }
}

/// Kind of a field. Unknown kinds read as [`FieldKind::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Numeric input.
    Number,
    /// Calendar date.
    Date,
    /// Email address.
    Email,
    /// Single choice from a drop-down.
    Select,
    /// Multi-line text.
    Textarea,
    /// Single choice from radio buttons.
    Radiolist,
    /// Any number of choices from checkboxes.
    Checklist,
    /// Free text with suggestions.
    Datalist,
    /// A group of child fields.
    Section,
    /// Single-line text.
    #[default]
    #[serde(other)]
    Text,
}

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    /// A bare value that doubles as its text.
    Plain(String),
    /// A value with separate display text.
    Labeled {
        /// Submitted value.
        value: String,
        /// Display text.
        text: String,
    },
}

impl FieldOption {
    /// Submitted value.
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Plain(v) | FieldOption::Labeled { value: v, .. } => v,
        }
    }

    /// Display text.
    pub fn text(&self) -> &str {
        match self {
            FieldOption::Plain(t) | FieldOption::Labeled { text: t, .. } => t,
        }
    }
}

/// One field, or a section of fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name. Sections may leave it empty.
    #[serde(default)]
    pub name: String,
    /// Field kind.
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Help text.
    #[serde(default)]
    pub hint: Option<String>,
    /// Placeholder text.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Default value.
    #[serde(default)]
    pub value: Option<FieldValue>,
    /// Default selection; wins over `value`.
    #[serde(default)]
    pub selected: Option<FieldValue>,
    /// Options for selects and lists.
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Child fields of a section.
    #[serde(default)]
    pub children: Vec<FieldDefinition>,
    /// Marks the field as required in the rendered form.
    #[serde(default)]
    pub required: bool,
    /// Keeps the field out of the rendered form.
    #[serde(default)]
    pub hidden: bool,
    /// Lays the field out inline with its neighbours.
    #[serde(default)]
    pub inline: bool,
}

impl FieldDefinition {
    /// The label, falling back to the name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The default value, `selected` taking precedence over `value`.
    pub fn default_value(&self) -> Option<&FieldValue> {
        self.selected.as_ref().or(self.value.as_ref())
    }
}

impl FormDefinition {
    /// Parses and checks a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.check()?;
        Ok(definition)
    }

    /// Reads a definition out of an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_value(value)?;
        definition.check()?;
        Ok(definition)
    }

    fn check(&self) -> Result<(), DefinitionError> {
        match self
            .leaf_fields()
            .into_iter()
            .position(|f| f.name.is_empty())
        {
            Some(index) => Err(DefinitionError::Shape(format!(
                "field #{index} has no name"
            ))),
            None => Ok(()),
        }
    }

    /// Every non-section field, sections expanded in place.
    pub fn leaf_fields(&self) -> Vec<&FieldDefinition> {
        fn walk<'a>(fields: &'a [FieldDefinition], out: &mut Vec<&'a FieldDefinition>) {
            for field in fields {
                if field.kind == FieldKind::Section {
                    walk(&field.children, out);
                } else {
                    out.push(field);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.fields, &mut out);
        out
    }

    /// Looks a field up by name, searching sections.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.leaf_fields().into_iter().find(|f| f.name == name)
    }

    /// The display name used in messages: the label if declared, else `name`.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.field(name).map_or(name, FieldDefinition::display_name)
    }

    /// Form data seeded from the field defaults.
    pub fn initial_data(&self) -> FormData {
        self.leaf_fields()
            .into_iter()
            .filter_map(|f| f.default_value().map(|v| (f.name.clone(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIGNUP: &str = r#"{
        "id": "signup",
        "title": "Sign up",
        "fields": [
            {"name": "email", "label": "Email", "type": "email"},
            {"name": "age", "type": "number", "value": 18},
            {"name": "plan", "type": "select", "value": "free", "selected": "pro",
             "options": ["free", {"value": "pro", "text": "Pro"}]},
            {"type": "section", "children": [
                {"name": "nickname", "type": "colour", "value": "kit"}
            ]}
        ]
    }"#;

    #[test]
    fn parses_defaults_and_kinds() {
        let def = FormDefinition::from_json(SIGNUP).unwrap();
        assert_eq!(def.submit_text, "Submit");
        assert_eq!(def.cancel_text, "Cancel");
        assert!(def.cancel);
        assert_eq!(def.field("nickname").unwrap().kind, FieldKind::Text);
        assert_eq!(def.field("plan").unwrap().options[1].text(), "Pro");
        assert_eq!(def.field("plan").unwrap().options[0].text(), "free");
    }

    #[test]
    fn known_kinds_and_layout_flags() {
        let def = FormDefinition::from_json(
            r#"{"fields": [
                {"name": "a", "type": "number"},
                {"name": "b", "type": "datalist", "inline": true, "hidden": true},
                {"name": "c", "type": "text", "required": true},
                {"name": "d"}
            ]}"#,
        )
        .unwrap();
        let kinds: Vec<FieldKind> = def.leaf_fields().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Number, FieldKind::Datalist, FieldKind::Text, FieldKind::Text]
        );
        let b = def.field("b").unwrap();
        assert!(b.inline && b.hidden && !b.required);
        assert!(def.field("c").unwrap().required);
        assert!(!def.field("d").unwrap().inline);
    }

    #[test]
    fn initial_data_prefers_selected_and_walks_sections() {
        let def = FormDefinition::from_json(SIGNUP).unwrap();
        let data = def.initial_data();
        assert_eq!(data.get("age"), Some(&FieldValue::Number(18.0)));
        assert_eq!(data.get("plan"), Some(&FieldValue::text("pro")));
        assert_eq!(data.get("nickname"), Some(&FieldValue::text("kit")));
        assert_eq!(data.get("email"), None);
    }

    #[test]
    fn display_name_falls_back_to_field_name() {
        let def = FormDefinition::from_json(SIGNUP).unwrap();
        assert_eq!(def.display_name("email"), "Email");
        assert_eq!(def.display_name("age"), "age");
        assert_eq!(def.display_name("unknown"), "unknown");
    }

    #[test]
    fn rejects_unnamed_fields() {
        let err = FormDefinition::from_json(r#"{"fields": [{"label": "x"}]}"#).unwrap_err();
        assert!(matches!(err, DefinitionError::Shape(_)));
        let err = FormDefinition::from_json("{").unwrap_err();
        assert!(matches!(err, DefinitionError::Json(_)));
    }
}
