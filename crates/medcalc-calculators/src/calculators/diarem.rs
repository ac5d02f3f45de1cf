use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::{WeightedSum, points_at_or_above};

use crate::Calculator;
use crate::inputs::Inputs;

/// DiaRem: likelihood of type 2 diabetes remission after Roux-en-Y gastric
/// bypass. Score 0–22; lower scores mean a higher chance of remission.
pub struct DiaRem;

const AGE_POINTS: &[(f64, f64)] = &[(40.0, 1.0), (50.0, 2.0), (60.0, 3.0)];
const HBA1C_POINTS: &[(f64, f64)] = &[(6.5, 2.0), (7.0, 4.0), (9.0, 6.0)];

impl Calculator for DiaRem {
    fn id(&self) -> &str {
        "diarem"
    }

    fn name(&self) -> &str {
        "DiaRem Score"
    }

    fn description(&self) -> &str {
        "Predicts type 2 diabetes remission after Roux-en-Y gastric bypass."
    }

    fn reference(&self) -> &str {
        "Still CD, Wood GC, Benotti P, et al. Preoperative prediction of type 2 diabetes \
         remission after Roux-en-Y gastric bypass surgery: a retrospective cohort study. \
         Lancet Diabetes Endocrinol. 2014;2(1):38-45."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::integer("age", "Age", 18.0, 100.0).with_unit("years"),
                FieldSpec::yes_no("insulin", "Insulin use"),
                FieldSpec::choice(
                    "diabetes_medication",
                    "Other diabetes medication",
                    &[
                        ("none", "None"),
                        ("metformin", "Metformin only"),
                        ("oral", "Sulfonylurea or other oral agent"),
                    ],
                ),
                FieldSpec::number("hba1c", "HbA1c", 4.0, 20.0).with_unit("%"),
            ]
        });
        &FIELDS
    }

    fn bands(&self) -> &BandTable {
        static BANDS: LazyLock<BandTable> = LazyLock::new(|| {
            BandTable::new(vec![
                Band::new(
                    0.0,
                    SeverityTier::Low,
                    "High (88-99%)",
                    "Remission after gastric bypass is very likely.",
                ),
                Band::new(
                    3.0,
                    SeverityTier::Moderate,
                    "Moderate (64-88%)",
                    "Remission after gastric bypass is likely.",
                ),
                Band::new(
                    9.0,
                    SeverityTier::High,
                    "Low (23-49%)",
                    "Remission after gastric bypass is uncertain.",
                ),
                Band::new(
                    13.0,
                    SeverityTier::VeryHigh,
                    "Very Low (11-33%)",
                    "Remission after gastric bypass is unlikely.",
                ),
                Band::new(
                    18.0,
                    SeverityTier::VeryHigh,
                    "Minimal (2-16%)",
                    "Remission after gastric bypass is very unlikely.",
                )
                .recommend(&["Plan for ongoing glycemic therapy after surgery."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 22.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let mut sum = WeightedSum::new();
        sum.add_points("age", "Age", points_at_or_above(inputs.number("age"), AGE_POINTS))
            .add("insulin", "Insulin use", 10.0, inputs.yes("insulin"))
            .add(
                "diabetes_medication",
                "Sulfonylurea or other oral agent",
                3.0,
                inputs.is("diabetes_medication", "oral"),
            )
            .add_points(
                "hba1c",
                "HbA1c",
                points_at_or_above(inputs.number("hba1c"), HBA1C_POINTS),
            );

        let score = sum.total();
        ScoreResult::from_band(score, self.bands().classify(score))
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
