use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::{WeightedSum, points_at_or_above, points_below};

use crate::Calculator;
use crate::inputs::Inputs;

/// BODE Index: BMI, airflow Obstruction, Dyspnea and Exercise capacity in
/// COPD. Score 0–10, grouped into survival quartiles.
pub struct Bode;

const FEV1_POINTS: &[(f64, f64)] = &[(65.0, 1.0), (50.0, 2.0), (36.0, 3.0)];
const WALK_POINTS: &[(f64, f64)] = &[(350.0, 1.0), (250.0, 2.0), (150.0, 3.0)];
const MMRC_POINTS: &[(f64, f64)] = &[(2.0, 1.0), (3.0, 2.0), (4.0, 3.0)];

impl Calculator for Bode {
    fn id(&self) -> &str {
        "bode"
    }

    fn name(&self) -> &str {
        "BODE Index"
    }

    fn description(&self) -> &str {
        "Predicts survival in chronic obstructive pulmonary disease."
    }

    fn reference(&self) -> &str {
        "Celli BR, Cote CG, Marin JM, et al. The body-mass index, airflow obstruction, \
         dyspnea, and exercise capacity index in chronic obstructive pulmonary disease. \
         N Engl J Med. 2004;350(10):1005-1012."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("fev1_percent", "FEV1", 5.0, 150.0)
                    .with_unit("% predicted")
                    .with_helper("Post-bronchodilator"),
                FieldSpec::number("six_minute_walk", "6-minute walk distance", 0.0, 1000.0)
                    .with_unit("m"),
                FieldSpec::integer("mmrc", "mMRC dyspnea grade", 0.0, 4.0)
                    .with_default("0")
                    .with_helper("0 = breathless only with strenuous exercise, 4 = too breathless to leave the house"),
                FieldSpec::number("bmi", "BMI", 10.0, 70.0).with_unit("kg/m²"),
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
                    "Quartile 1 (0-2)",
                    "Approximate 4-year survival 80%.",
                ),
                Band::new(
                    3.0,
                    SeverityTier::Moderate,
                    "Quartile 2 (3-4)",
                    "Approximate 4-year survival 67%.",
                ),
                Band::new(
                    5.0,
                    SeverityTier::High,
                    "Quartile 3 (5-6)",
                    "Approximate 4-year survival 57%.",
                )
                .recommend(&["Consider pulmonary rehabilitation."]),
                Band::new(
                    7.0,
                    SeverityTier::VeryHigh,
                    "Quartile 4 (7-10)",
                    "Approximate 4-year survival 18%.",
                )
                .recommend(&[
                    "Consider pulmonary rehabilitation.",
                    "Evaluate for lung volume reduction or transplant referral.",
                ]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 10.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let mut sum = WeightedSum::new();
        sum.add("bmi", "BMI ≤ 21 kg/m²", 1.0, inputs.number("bmi") <= 21.0)
            .add_points(
                "fev1_percent",
                "Airflow obstruction (FEV1)",
                points_below(inputs.number("fev1_percent"), FEV1_POINTS),
            )
            .add_points(
                "mmrc",
                "Dyspnea (mMRC)",
                points_at_or_above(inputs.number("mmrc"), MMRC_POINTS),
            )
            .add_points(
                "six_minute_walk",
                "Exercise capacity (6MWD)",
                points_below(inputs.number("six_minute_walk"), WALK_POINTS),
            );

        let score = sum.total();
        ScoreResult::from_band(score, self.bands().classify(score))
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
