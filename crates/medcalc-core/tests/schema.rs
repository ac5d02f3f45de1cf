use medcalc_core::bands::{Band, BandTable};
use medcalc_core::error::SchemaError;
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::SeverityTier;

fn table() -> BandTable {
    BandTable::new(vec![
        Band::new(0.0, SeverityTier::Low, "Low Risk", "Low."),
        Band::new(2.0, SeverityTier::Moderate, "Moderate Risk", "Moderate."),
        Band::new(3.0, SeverityTier::High, "High Risk", "High.").recommend(&["Admit."]),
    ])
}

#[test]
fn inverted_range_is_rejected() {
    let spec = FieldSpec::number("bmi", "BMI", 70.0, 10.0);
    assert!(matches!(
        spec.check(),
        Err(SchemaError::InvertedRange { .. })
    ));
}

#[test]
fn choice_without_options_is_rejected() {
    let spec = FieldSpec::choice("sex", "Sex", &[]);
    assert!(matches!(spec.check(), Err(SchemaError::NoOptions(_))));
}

#[test]
fn defaults_must_validate() {
    let good = FieldSpec::integer("mmrc", "mMRC grade", 0.0, 4.0).with_default("0");
    assert!(good.check().is_ok());

    let bad = FieldSpec::integer("mmrc", "mMRC grade", 0.0, 4.0).with_default("9");
    assert!(matches!(
        bad.check(),
        Err(SchemaError::InvalidDefault { .. })
    ));
}

#[test]
fn classify_picks_the_enclosing_band() {
    let table = table();
    assert_eq!(table.classify(0.0).label, "Low Risk");
    assert_eq!(table.classify(1.9).label, "Low Risk");
    assert_eq!(table.classify(2.0).label, "Moderate Risk");
    assert_eq!(table.classify(3.0).label, "High Risk");
    assert_eq!(table.classify(50.0).label, "High Risk");
    assert_eq!(table.classify(3.0).recommendations, vec!["Admit."]);
}

#[test]
fn scores_below_the_table_fall_back_to_first_band() {
    assert_eq!(table().classify(-1.0).label, "Low Risk");
    assert_eq!(table().classify(f64::NAN).label, "Low Risk");
}

#[test]
fn every_score_matches_exactly_one_band() {
    let table = table();
    for score in ValueRange::stepped(0.0, 5.0, 0.5).points(1.0) {
        assert_eq!(table.matching(score), 1, "score {score}");
    }
}

#[test]
fn check_accepts_contiguous_table() {
    assert!(table().check(&ValueRange::stepped(0.0, 5.0, 1.0)).is_ok());
}

#[test]
fn check_rejects_uncovered_minimum() {
    assert!(matches!(
        table().check(&ValueRange::new(-1.0, 5.0)),
        Err(SchemaError::UncoveredMinimum { .. })
    ));
}

#[test]
fn check_rejects_unordered_bands() {
    let table = BandTable::new(vec![
        Band::new(0.0, SeverityTier::Low, "A", ""),
        Band::new(3.0, SeverityTier::High, "B", ""),
        Band::new(3.0, SeverityTier::High, "C", ""),
    ]);
    assert!(matches!(
        table.check(&ValueRange::new(0.0, 5.0)),
        Err(SchemaError::UnorderedBands { .. })
    ));
}

#[test]
fn check_rejects_unreachable_band() {
    assert!(matches!(
        table().check(&ValueRange::new(0.0, 2.5)),
        Err(SchemaError::UnreachableBand { .. })
    ));
}

#[test]
fn check_rejects_empty_table() {
    assert!(matches!(
        BandTable::new(Vec::new()).check(&ValueRange::new(0.0, 1.0)),
        Err(SchemaError::EmptyBands)
    ));
}

#[test]
fn stepped_range_points_cover_both_ends() {
    let points = ValueRange::stepped(15.0, 16.0, 0.5).points(1.0);
    assert_eq!(points, vec![15.0, 15.5, 16.0]);
    assert!(ValueRange::stepped(15.0, 60.0, 0.5).contains(29.5));
    assert!(!ValueRange::stepped(15.0, 60.0, 0.5).contains(29.7));
}

#[test]
fn field_spec_serializes_with_tagged_kind() {
    let spec = FieldSpec::number("weight", "Weight", 20.0, 300.0).with_unit("kg");
    let json = serde_json::to_value(&spec).unwrap();

    assert_eq!(json["name"], "weight");
    assert_eq!(json["kind"]["type"], "number");
    assert_eq!(json["kind"]["range"]["min"], 20.0);
    assert_eq!(json["unit"], "kg");
    assert!(json["default"].is_null());
}

#[test]
fn bands_serialize_tier_in_snake_case() {
    let json = serde_json::to_value(table()).unwrap();
    assert_eq!(json["bands"][2]["tier"], "high");
    assert_eq!(json["bands"][2]["recommendations"][0], "Admit.");
}
