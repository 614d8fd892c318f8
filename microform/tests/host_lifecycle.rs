//! End-to-end behavior of a form host with capabilities connected.

mod common;

use common::signup_host;
use microform::{
    ERRORS_KEY, FieldValue, FormEvent, RemoteDefinition, Rules, SubmitOutcome, Translation,
    Validation, testing::RecordingAction, validation::Translations,
};
use pretty_assertions::assert_eq;

fn signup_validation(host: &microform::FormHost) -> Validation {
    Validation::new(
        Rules::new()
            .with("username", "required")
            .with("email", "required|email")
            .with("age", "number|min:18"),
    )
    .with_definition(host.definition().clone())
}

#[test]
fn connect_announces_scope_and_id() {
    let host = signup_host();
    let connected = RecordingAction::new();
    host.api().on(FormEvent::Connected, &connected.handle());
    host.connect(&[]).unwrap();

    assert_eq!(
        connected.calls(),
        vec![FieldValue::map([
            ("scope", FieldValue::text("signup")),
            ("id", FieldValue::text("signup")),
        ])]
    );
}

#[test]
fn field_errors_follow_changes() {
    let mut host = signup_host();
    let validation = signup_validation(&host);
    host.connect(&[&validation]).unwrap();

    assert_eq!(host.change("email", "nope").unwrap(), Some("Email must be a valid email."));
    assert_eq!(
        host.change("email", "").unwrap(),
        Some("Email is required. Email must be a valid email.")
    );
    assert_eq!(host.change("email", "me@example.com").unwrap(), None);
    assert_eq!(host.change("plan", "pro").unwrap(), None);
}

#[test]
fn submit_is_blocked_until_valid() {
    let mut host = signup_host();
    let validation = signup_validation(&host);
    host.connect(&[&validation]).unwrap();
    let submitted = RecordingAction::new();
    host.api().on(FormEvent::Submitted, &submitted.handle());

    let SubmitOutcome::Rejected(errors) = host.submit().unwrap() else {
        panic!("empty form must not submit");
    };
    assert_eq!(errors.joined("username").as_deref(), Some("Username is required."));
    assert_eq!(host.field_error("username"), Some("Username is required."));
    assert_eq!(submitted.count(), 0);

    host.change("username", "ada").unwrap();
    host.change("email", "ada@example.com").unwrap();
    host.change("age", 36.0).unwrap();

    let SubmitOutcome::Submitted(payload) = host.submit().unwrap() else {
        panic!("valid form must submit");
    };
    assert!(payload.get(ERRORS_KEY).is_none());
    assert_eq!(payload.get("plan"), Some(&FieldValue::text("free")));
    assert_eq!(host.field_errors().count(), 0);

    let event = &submitted.calls()[0];
    assert_eq!(event.get("scope"), Some(&FieldValue::text("signup")));
    assert_eq!(event.get("data"), Some(&payload.to_value()));
    assert!(event.get("data").and_then(|d| d.get(ERRORS_KEY)).is_none());
}

#[test]
fn removed_subscribers_stop_hearing_events() {
    let host = signup_host();
    let cancelled = RecordingAction::new();
    let handle = cancelled.handle();
    host.api().on(FormEvent::Cancelled, &handle);
    host.cancel().unwrap();
    host.api().off(FormEvent::Cancelled, &handle);
    host.cancel().unwrap();
    assert_eq!(cancelled.count(), 1);
}

#[test]
fn translation_rewrites_texts() {
    let host = signup_host();
    let translation = Translation::new(
        Translations::new()
            .with("de", "username:label", "Benutzername")
            .with("de", "actions:submit", "Absenden")
            .with("de", "form:title", "Registrieren")
            .with_locale("de"),
    );
    host.connect(&[&translation]).unwrap();

    let field = host.field_text("username").unwrap().unwrap();
    assert_eq!(field.label.as_deref(), Some("Benutzername"));
    assert_eq!(field.placeholder.as_deref(), Some("jdoe"));

    let form = host.form_text().unwrap();
    assert_eq!(form.title.as_deref(), Some("Registrieren"));
    assert_eq!(form.description.as_deref(), Some("Create an account"));
    assert_eq!(form.submit_text, "Absenden");
    assert_eq!(form.cancel_text, "Cancel");
}

#[test]
fn locale_field_switches_translations() {
    let mut host = signup_host();
    let translation = Translation::new(
        Translations::new()
            .with("en", "username:label", "User name")
            .with("es", "username:label", "Nombre de usuario"),
    )
    .with_locale_field("locale");
    host.connect(&[&translation]).unwrap();

    let label = |host: &microform::FormHost| host.field_text("username").unwrap().unwrap().label;
    assert_eq!(label(&host).as_deref(), Some("User name"));
    host.change("locale", "es").unwrap();
    assert_eq!(label(&host).as_deref(), Some("Nombre de usuario"));
}

#[test]
fn remote_bundle_drives_the_whole_form() {
    let remote = RemoteDefinition::from_json(
        r#"{
            "id": "login",
            "fields": [
                {"name": "username", "label": "Username"},
                {"name": "password", "label": "Password"}
            ],
            "validations": {"username": "required", "password": "required"},
            "translations": {"es": {"required:password": "se requiere contraseña"}},
            "locale": "es"
        }"#,
    )
    .unwrap();
    let mut host = remote.host();
    host.connect(&[&remote]).unwrap();
    assert_eq!(host.scope(), Some("remote"));

    let SubmitOutcome::Rejected(errors) = host.submit().unwrap() else {
        panic!("empty login must not submit");
    };
    assert_eq!(errors.joined("username").as_deref(), Some("Username is required."));
    assert_eq!(errors.joined("password").as_deref(), Some("se requiere contraseña"));

    host.change("username", "ada").unwrap();
    host.change("password", "hunter2").unwrap();
    assert!(host.submit().unwrap().is_submitted());
}

#[test]
fn reset_clears_errors() {
    let mut host = signup_host();
    let validation = signup_validation(&host);
    host.connect(&[&validation]).unwrap();
    host.change("username", "").unwrap();
    assert!(host.field_error("username").is_some());

    host.reset();
    assert_eq!(host.field_error("username"), None);
    assert_eq!(host.data().get("plan"), Some(&FieldValue::text("free")));
    assert_eq!(host.data().get("username"), None);
}
