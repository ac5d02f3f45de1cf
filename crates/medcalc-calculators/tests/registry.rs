use std::collections::HashSet;

use medcalc_calculators::error::CalculatorError;
use medcalc_calculators::form::{FormController, FormOptions};
use medcalc_calculators::{Calculator, all_calculators, check_registry, get_calculator, require_calculator};
use medcalc_core::field::{FieldKind, FieldSpec};

/// A valid raw value for a field: the range minimum or maximum, or the first
/// or last option.
fn boundary_value(spec: &FieldSpec, high: bool) -> String {
    match &spec.kind {
        FieldKind::Number { range } | FieldKind::Integer { range } => {
            let value = if high { range.max } else { range.min };
            value.to_string()
        }
        FieldKind::Choice { options } => {
            let option = if high { options.last() } else { options.first() };
            option.map(|o| o.value.clone()).unwrap_or_default()
        }
    }
}

fn filled(calculator: Box<dyn Calculator>, high: bool) -> FormController {
    let specs = calculator.fields().to_vec();
    let mut form = FormController::new(calculator, FormOptions::default());
    for spec in &specs {
        form.set_field(&spec.name, boundary_value(spec, high)).unwrap();
    }
    form
}

#[test]
fn registry_schema_is_valid() {
    check_registry().unwrap();
}

#[test]
fn ids_are_unique() {
    let ids: HashSet<_> = all_calculators().iter().map(|c| c.id().to_string()).collect();
    assert_eq!(ids.len(), all_calculators().len());
}

#[test]
fn lookup_by_id() {
    assert_eq!(get_calculator("berlin").unwrap().name(), "Berlin Questionnaire");
    assert!(get_calculator("sts").is_none());
    assert!(matches!(
        require_calculator("sts"),
        Err(CalculatorError::UnknownCalculator(_))
    ));
}

#[test]
fn every_score_in_bounds_maps_to_exactly_one_band() {
    for calculator in all_calculators() {
        let bounds = calculator.score_bounds();
        for score in bounds.points(1.0) {
            assert_eq!(
                calculator.bands().matching(score),
                1,
                "{}: score {score}",
                calculator.id()
            );
        }
    }
}

#[test]
fn boundary_inputs_score_within_bounds() {
    for calculator in all_calculators() {
        let id = calculator.id().to_string();
        let bounds = calculator.score_bounds();
        for high in [false, true] {
            let mut form = filled(get_calculator(&id).unwrap(), high);
            let result = form
                .calculate()
                .unwrap_or_else(|| panic!("{id} rejected boundary inputs"));
            assert!(
                result.raw_score >= bounds.min && result.raw_score <= bounds.max,
                "{id}: score {} outside [{}, {}]",
                result.raw_score,
                bounds.min,
                bounds.max
            );
            assert!(!result.reference.is_empty(), "{id} has no reference");
        }
    }
}

#[test]
fn any_empty_field_blocks_every_calculator() {
    for calculator in all_calculators() {
        let id = calculator.id().to_string();
        for spec in calculator.fields() {
            let mut form = filled(get_calculator(&id).unwrap(), false);
            form.set_field(&spec.name, "").unwrap();
            assert!(form.calculate().is_none(), "{id}: scored without {}", spec.name);
            assert_eq!(
                form.errors().error(&spec.name),
                Some(format!("{} is required.", spec.label).as_str())
            );
        }
    }
}

#[test]
fn summary_renders_result_panel() {
    let calculator = get_calculator("adhere").unwrap();
    let mut form = FormController::new(get_calculator("adhere").unwrap(), FormOptions::default());
    form.set_field("bun", "50").unwrap();
    form.set_field("systolic_bp", "100").unwrap();
    form.set_field("creatinine", "3.0").unwrap();
    let result = form.calculate().unwrap();

    let summary = calculator.render_summary(result);
    assert!(summary.starts_with("## ADHERE Algorithm"));
    assert!(summary.contains("**Very High Risk**"));
    assert!(summary.contains("Probability: 21.9%"));
    assert!(summary.contains("- Consider ICU-level care."));
    assert!(summary.contains("Reference: Fonarow GC"));
}
