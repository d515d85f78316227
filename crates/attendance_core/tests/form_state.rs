use attendance_core::{validate_rules, FieldErrors, FieldRule, FieldValues, FormState, SubmitOutcome};
use std::cell::Cell;

fn require_name(values: &FieldValues<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if values.get("name").map_or(true, |name| name.trim().is_empty()) {
        errors.insert("name".to_string(), "name is required".to_string());
    }
    errors
}

#[test]
fn set_field_replaces_one_value() {
    let mut form = FormState::new([("name", String::new()), ("email", String::new())]);

    form.set_field("name", "Ada".to_string());
    assert_eq!(form.value("name").map(String::as_str), Some("Ada"));
    assert_eq!(form.value("email").map(String::as_str), Some(""));
    assert_eq!(form.values().len(), 2);
}

#[test]
fn submit_gates_on_freshly_computed_errors() {
    let mut form = FormState::new([("name", String::new())]);
    let calls = Cell::new(0);

    let outcome = form
        .submit(require_name, |_| -> Result<(), String> {
            calls.set(calls.get() + 1);
            Ok(())
        })
        .expect("validation failure is not an action error");
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(calls.get(), 0, "first invalid submit must not run the action");
    assert_eq!(form.error("name"), Some("name is required"));
    assert!(!form.is_submitting());

    form.set_field("name", "Ada".to_string());
    let outcome = form
        .submit(require_name, |_| -> Result<(), String> {
            calls.set(calls.get() + 1);
            Ok(())
        })
        .expect("valid submit");
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(calls.get(), 1, "first valid submit runs the action");
    assert!(form.errors().is_empty());
}

#[test]
fn is_submitting_is_true_only_during_action() {
    let mut form = FormState::new([("name", "Ada".to_string())]);
    let observed = Cell::new(false);

    form.submit(require_name, |state| -> Result<(), String> {
        observed.set(state.is_submitting());
        Ok(())
    })
    .expect("valid submit");

    assert!(observed.get());
    assert!(!form.is_submitting());
}

#[test]
fn failing_action_propagates_and_clears_flag() {
    let mut form = FormState::new([("name", "Ada".to_string())]);

    let err = form
        .submit(require_name, |_| Err("network down".to_string()))
        .expect_err("action error propagates");
    assert_eq!(err, "network down");
    assert!(!form.is_submitting());
}

#[test]
fn reset_restores_initial_values_and_clears_errors() {
    let mut form = FormState::new([("name", String::new())]);
    form.submit(require_name, |_| -> Result<(), String> { Ok(()) })
        .expect("rejected submit");
    form.set_field("name", "Temp".to_string());

    form.reset();
    assert_eq!(form.value("name").map(String::as_str), Some(""));
    assert!(form.errors().is_empty());

    form.submit(require_name, |_| -> Result<(), String> { Ok(()) })
        .expect("rejected submit");
    form.clear_error("name");
    assert_eq!(form.error("name"), None);
}

#[test]
fn validate_rules_reports_first_failure_per_field() {
    let mut values = FieldValues::new();
    values.insert("traineeName".to_string(), "  ".to_string());
    values.insert("email".to_string(), "not-an-email".to_string());
    values.insert("traineeId".to_string(), "TR-0000000001".to_string());

    let rules = [
        ("traineeName", FieldRule::Required),
        ("traineeName", FieldRule::MaxChars(3)),
        ("email", FieldRule::Email),
        ("traineeId", FieldRule::Required),
        ("traineeId", FieldRule::MaxChars(8)),
        ("mentor", FieldRule::Email),
    ];
    let errors = validate_rules(&values, &rules);

    assert_eq!(errors.len(), 3);
    assert_eq!(errors["traineeName"], "traineeName is required");
    assert_eq!(errors["email"], "email must be a valid email address");
    assert_eq!(errors["traineeId"], "traineeId must be at most 8 characters");

    values.insert("traineeName".to_string(), "Ada".to_string());
    values.insert("email".to_string(), "ada@example.org".to_string());
    values.insert("traineeId".to_string(), "TR-1".to_string());
    assert!(validate_rules(&values, &rules).is_empty());
}
