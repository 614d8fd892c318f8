//! Rule evaluation and message resolution through the facade.

mod common;

use chrono::NaiveDate;
use microform::{
    CompiledRule, FieldValue, FormData, FormDefinition, Rules, compile,
    validation::{Translations, Validator},
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn data<const N: usize>(entries: [(&str, FieldValue); N]) -> FormData {
    entries.into_iter().collect()
}

#[test]
fn rule_strings_compile_in_order() {
    assert_eq!(
        compile("required|min:5"),
        vec![CompiledRule::bare("required"), CompiledRule::with_arg("min", "5")]
    );
}

#[test]
fn pass_fail_table() {
    let validator = Validator::new();

    let errors = validator.validate(
        &data([("age", FieldValue::Number(3.0))]),
        &Rules::new().with("age", "min:5"),
    );
    assert_eq!(
        errors.get("age"),
        Some(&["age must be greater than 5.".to_string()][..])
    );

    let errors = validator.validate(
        &data([("email", FieldValue::text("a@b.com"))]),
        &Rules::new().with("email", "required|email"),
    );
    assert!(errors.is_empty());

    let errors = validator.validate(
        &data([("name", FieldValue::text(""))]),
        &Rules::new().with("name", "required"),
    );
    assert_eq!(errors.joined("name").as_deref(), Some("name is required."));

    assert!(validator.validate(&FormData::new(), &Rules::new()).is_empty());
}

#[test]
fn emptiness_boundary() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(FieldValue::text("   ").is_empty());
    assert!(FieldValue::List(Vec::new()).is_empty());
    assert!(!FieldValue::Number(0.0).is_empty());
    assert!(!FieldValue::Date(today).is_empty());
    assert!(FieldValue::map::<&str, _>([]).is_empty());
    assert!(!FieldValue::map([("a", FieldValue::Number(1.0))]).is_empty());
    assert!(!FieldValue::computed(|| FieldValue::Null).is_empty());
}

#[test]
fn locale_override_beats_generic_message() {
    let validator = Validator::new()
        .with_message("required", "Required!")
        .with_translations(
            Translations::new()
                .with("fr", "required:name", "Le nom est requis.")
                .with_locale("fr"),
        );
    let errors = validator.validate(&FormData::new(), &Rules::new().with("name", "required"));
    assert_eq!(errors.joined("name").as_deref(), Some("Le nom est requis."));
}

#[test]
fn messages_use_labels_from_sections() {
    let definition = Arc::new(FormDefinition::from_json(common::SIGNUP).unwrap());
    let validator = Validator::new().with_definition(definition);
    let errors = validator.validate(
        &data([("age", FieldValue::text("12"))]),
        &Rules::new().with("age", "number|min:18").with("birthday", "required"),
    );
    assert_eq!(
        errors.get("age"),
        Some(&["Age must be a valid number.".to_string(), "Age must be greater than 18.".to_string()][..])
    );
    assert_eq!(errors.joined("birthday").as_deref(), Some("birthday is required."));
}

#[test]
fn validating_twice_gives_the_same_result() {
    let validator = Validator::new();
    let input = data([
        ("age", FieldValue::Number(17.5)),
        ("email", FieldValue::text("x@")),
    ]);
    let rules = Rules::new()
        .with("age", "integer|max:10")
        .with("email", "required|email")
        .with("start", "date");
    let first = validator.validate(&input, &rules);
    assert_eq!(first.len(), 3);
    assert_eq!(first, validator.validate(&input, &rules));
}
