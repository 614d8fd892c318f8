#![allow(dead_code)]

use microform::{Callback, FieldValue, FilterRef, FormHost};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Definitions
// ============================================================================

pub const SIGNUP: &str = r#"{
    "id": "signup",
    "title": "Sign up",
    "description": "Create an account",
    "fields": [
        {"name": "username", "label": "Username", "placeholder": "jdoe"},
        {"name": "email", "type": "email", "label": "Email"},
        {
            "type": "section",
            "label": "About you",
            "children": [
                {"name": "age", "type": "number", "label": "Age"},
                {"name": "birthday", "type": "date"}
            ]
        },
        {"name": "plan", "type": "select", "selected": "free", "options": ["free", {"value": "pro", "text": "Pro"}]}
    ]
}"#;

pub fn signup_host() -> FormHost {
    FormHost::from_json(SIGNUP).unwrap().with_scope("signup")
}

// ============================================================================
// Test Callbacks
// ============================================================================

/// A filter that appends `suffix` to text values and logs its id.
pub fn suffix_filter(suffix: &'static str, order: Arc<Mutex<Vec<&'static str>>>) -> FilterRef<FieldValue> {
    Callback::filter(move |value: FieldValue, _: &FieldValue| {
        order.lock().unwrap().push(suffix);
        Ok(match value {
            FieldValue::Text(text) => FieldValue::Text(format!("{text}{suffix}")),
            other => other,
        })
    })
}
