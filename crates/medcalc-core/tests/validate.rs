use medcalc_core::field::{FieldSpec, FieldValue};
use medcalc_core::validate::{FieldErrorKind, TrimPolicy, validate_field};

fn weight() -> FieldSpec {
    FieldSpec::number("weight", "Weight", 30.0, 300.0).with_unit("kg")
}

fn age() -> FieldSpec {
    FieldSpec::integer("age", "Age", 18.0, 120.0)
}

fn message(spec: &FieldSpec, raw: &str) -> String {
    validate_field(spec, raw, TrimPolicy::Trim)
        .expect_err("expected a validation error")
        .message
}

#[test]
fn empty_input_is_required() {
    assert_eq!(message(&weight(), ""), "Weight is required.");
}

#[test]
fn whitespace_only_is_required_when_trimming() {
    assert_eq!(message(&weight(), "   "), "Weight is required.");
}

#[test]
fn preserve_policy_rejects_padded_numbers() {
    let err = validate_field(&weight(), " 80", TrimPolicy::Preserve).unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::NotANumber);
    assert_eq!(err.message, "Weight must be a number.");
}

#[test]
fn trim_policy_accepts_padded_numbers() {
    let value = validate_field(&weight(), " 80 ", TrimPolicy::Trim).unwrap();
    assert_eq!(value, FieldValue::Number(80.0));
}

#[test]
fn non_numeric_input_is_rejected() {
    assert_eq!(message(&weight(), "eighty"), "Weight must be a number.");
    assert_eq!(message(&weight(), "inf"), "Weight must be a number.");
    assert_eq!(message(&weight(), "NaN"), "Weight must be a number.");
}

#[test]
fn range_bounds_are_inclusive() {
    assert_eq!(
        validate_field(&weight(), "30", TrimPolicy::Trim).unwrap(),
        FieldValue::Number(30.0)
    );
    assert_eq!(
        validate_field(&weight(), "300", TrimPolicy::Trim).unwrap(),
        FieldValue::Number(300.0)
    );
    assert_eq!(
        validate_field(&age(), "18", TrimPolicy::Trim).unwrap(),
        FieldValue::Integer(18)
    );
    assert_eq!(
        validate_field(&age(), "120", TrimPolicy::Trim).unwrap(),
        FieldValue::Integer(120)
    );
}

#[test]
fn values_just_outside_range_are_rejected() {
    for raw in ["29.999999", "300.000001"] {
        let err = validate_field(&weight(), raw, TrimPolicy::Trim).unwrap_err();
        assert_eq!(
            err.kind,
            FieldErrorKind::OutOfRange {
                min: 30.0,
                max: 300.0
            }
        );
        assert_eq!(err.message, "Weight must be between 30 and 300.");
    }
}

#[test]
fn fractional_bounds_render_without_padding() {
    let spec = FieldSpec::number("creatinine", "Creatinine", 0.2, 15.0);
    assert_eq!(
        message(&spec, "0.1"),
        "Creatinine must be between 0.2 and 15."
    );
}

#[test]
fn integer_fields_reject_fractions() {
    let err = validate_field(&age(), "42.5", TrimPolicy::Trim).unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::NotAnInteger);
    assert_eq!(err.message, "Age must be an integer.");
}

#[test]
fn range_is_checked_before_integrality() {
    let err = validate_field(&age(), "130.5", TrimPolicy::Trim).unwrap_err();
    assert!(matches!(err.kind, FieldErrorKind::OutOfRange { .. }));
}

#[test]
fn integer_fields_accept_whole_decimals() {
    assert_eq!(
        validate_field(&age(), "45.0", TrimPolicy::Trim).unwrap(),
        FieldValue::Integer(45)
    );
}

#[test]
fn choice_fields_accept_declared_values_only() {
    let spec = FieldSpec::yes_no("hypertension", "High blood pressure");
    assert_eq!(
        validate_field(&spec, "yes", TrimPolicy::Trim).unwrap(),
        FieldValue::Choice("yes".to_string())
    );
    let err = validate_field(&spec, "maybe", TrimPolicy::Trim).unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::InvalidOption);
    assert_eq!(err.message, "High blood pressure must be a valid option.");
}

#[test]
fn choice_values_are_matched_exactly() {
    let spec = FieldSpec::yes_no("hypertension", "High blood pressure");
    let err = validate_field(&spec, "Yes", TrimPolicy::Trim).unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::InvalidOption);
}

#[test]
fn error_carries_field_name() {
    let err = validate_field(&age(), "", TrimPolicy::Trim).unwrap_err();
    assert_eq!(err.field, "age");
    assert_eq!(err.to_string(), "Age is required.");
}
