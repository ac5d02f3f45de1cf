use medcalc_calculators::error::CalculatorError;
use medcalc_calculators::form::{
    CORRECT_ERRORS_ALERT, FormController, FormOptions, FormPhase, ValidationMode,
};
use medcalc_calculators::get_calculator;
use medcalc_core::validate::TrimPolicy;

fn adhere(mode: ValidationMode) -> FormController {
    let options = FormOptions {
        validation_mode: mode,
        trim: TrimPolicy::Trim,
    };
    FormController::new(get_calculator("adhere").unwrap(), options)
}

fn fill(form: &mut FormController) {
    form.set_field("bun", "50").unwrap();
    form.set_field("systolic_bp", "100").unwrap();
    form.set_field("creatinine", "2.0").unwrap();
}

#[test]
fn new_form_is_idle() {
    let form = adhere(ValidationMode::OnSubmit);
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.values().is_empty());
    assert!(form.errors().is_valid());
    assert!(form.result().is_none());
}

#[test]
fn defaults_prefill_the_form() {
    let form = FormController::new(get_calculator("bode").unwrap(), FormOptions::default());
    assert_eq!(form.value("mmrc"), Some("0"));
}

#[test]
fn empty_form_never_scores() {
    let mut form = adhere(ValidationMode::OnSubmit);
    assert!(form.calculate().is_none());
    assert_eq!(form.errors().len(), 3);
    assert_eq!(form.errors().error("bun"), Some("BUN is required."));
    assert_eq!(form.alert(), Some(CORRECT_ERRORS_ALERT));
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn one_missing_field_blocks_calculation() {
    let mut form = adhere(ValidationMode::OnSubmit);
    fill(&mut form);
    form.set_field("creatinine", "").unwrap();

    assert!(form.calculate().is_none());
    assert_eq!(form.errors().len(), 1);
    assert_eq!(form.errors().error("creatinine"), Some("Creatinine is required."));
}

#[test]
fn on_change_validates_the_edited_field_only() {
    let mut form = adhere(ValidationMode::OnChange);
    form.set_field("bun", "abc").unwrap();

    assert_eq!(form.errors().error("bun"), Some("BUN must be a number."));
    assert_eq!(form.errors().error("systolic_bp"), None);

    form.set_field("bun", "50").unwrap();
    assert_eq!(form.errors().error("bun"), None);
}

#[test]
fn on_submit_defers_errors_until_calculate() {
    let mut form = adhere(ValidationMode::OnSubmit);
    form.set_field("bun", "900").unwrap();
    assert!(form.errors().is_valid());

    form.calculate();
    assert_eq!(
        form.errors().error("bun"),
        Some("BUN must be between 1 and 300.")
    );

    // Editing the field clears its error so it cannot go stale.
    form.set_field("bun", "50").unwrap();
    assert_eq!(form.errors().error("bun"), None);
}

#[test]
fn unknown_field_is_rejected() {
    let mut form = adhere(ValidationMode::OnSubmit);
    let err = form.set_field("heart_rate", "80").unwrap_err();
    assert!(matches!(err, CalculatorError::UnknownField { .. }));
    assert!(form.values().is_empty());
}

#[test]
fn phases_follow_the_edit_cycle() {
    let mut form = adhere(ValidationMode::OnChange);
    assert_eq!(form.phase(), FormPhase::Idle);

    form.set_field("bun", "50").unwrap();
    assert_eq!(form.phase(), FormPhase::Editing);

    form.set_field("systolic_bp", "100").unwrap();
    form.set_field("creatinine", "2.0").unwrap();
    assert_eq!(form.phase(), FormPhase::Ready);

    form.calculate();
    assert_eq!(form.phase(), FormPhase::Computed);

    form.set_field("bun", "20").unwrap();
    assert_eq!(form.phase(), FormPhase::Ready);
    assert!(form.result().is_none());

    form.reset();
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[test]
fn successful_calculation_clears_alert() {
    let mut form = adhere(ValidationMode::OnSubmit);
    form.calculate();
    assert!(form.alert().is_some());

    fill(&mut form);
    assert!(form.alert().is_none());
    assert!(form.calculate().is_some());
    assert!(form.alert().is_none());
    assert!(form.errors().is_valid());
}

#[test]
fn calculate_is_idempotent() {
    let mut form = adhere(ValidationMode::OnSubmit);
    fill(&mut form);
    let first = form.calculate().cloned().unwrap();
    let second = form.calculate().cloned().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.raw_score.to_bits(), second.raw_score.to_bits());
}

#[test]
fn reset_then_reentry_reproduces_result() {
    let mut form = adhere(ValidationMode::OnSubmit);
    fill(&mut form);
    let before = form.calculate().cloned().unwrap();

    form.reset();
    assert!(form.values().is_empty());
    assert!(form.result().is_none());
    assert!(form.errors().is_valid());
    assert!(form.alert().is_none());

    fill(&mut form);
    let after = form.calculate().cloned().unwrap();
    assert_eq!(before, after);
}

#[test]
fn trimming_policy_is_applied() {
    let mut trimmed = adhere(ValidationMode::OnSubmit);
    trimmed.set_field("bun", " 50 ").unwrap();
    trimmed.set_field("systolic_bp", "100").unwrap();
    trimmed.set_field("creatinine", "2.0").unwrap();
    assert!(trimmed.calculate().is_some());

    let options = FormOptions {
        validation_mode: ValidationMode::OnSubmit,
        trim: TrimPolicy::Preserve,
    };
    let mut preserved = FormController::new(get_calculator("adhere").unwrap(), options);
    preserved.set_field("bun", " 50 ").unwrap();
    preserved.set_field("systolic_bp", "100").unwrap();
    preserved.set_field("creatinine", "2.0").unwrap();
    assert!(preserved.calculate().is_none());
    assert_eq!(preserved.errors().error("bun"), Some("BUN must be a number."));
}

#[test]
fn options_deserialize_with_defaults() {
    let options: FormOptions =
        serde_json::from_str(r#"{ "validation_mode": "on_change" }"#).unwrap();
    assert_eq!(options.validation_mode, ValidationMode::OnChange);
    assert_eq!(options.trim, TrimPolicy::Trim);

    let options: FormOptions = serde_json::from_str(r#"{ "trim": "preserve" }"#).unwrap();
    assert_eq!(options.validation_mode, ValidationMode::OnSubmit);
    assert_eq!(options.trim, TrimPolicy::Preserve);
}
