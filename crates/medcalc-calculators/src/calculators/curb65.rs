use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::WeightedSum;

use crate::Calculator;
use crate::inputs::Inputs;

/// CURB-65: 30-day mortality in community-acquired pneumonia.
pub struct Curb65;

impl Calculator for Curb65 {
    fn id(&self) -> &str {
        "curb65"
    }

    fn name(&self) -> &str {
        "CURB-65"
    }

    fn description(&self) -> &str {
        "Estimates mortality of community-acquired pneumonia to guide site of care."
    }

    fn reference(&self) -> &str {
        "Lim WS, van der Eerden MM, Laing R, et al. Defining community acquired pneumonia \
         severity on presentation to hospital: an international derivation and validation \
         study. Thorax. 2003;58(5):377-382."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::yes_no("confusion", "Confusion"),
                FieldSpec::number("bun", "BUN", 1.0, 300.0).with_unit("mg/dL"),
                FieldSpec::integer("respiratory_rate", "Respiratory rate", 0.0, 80.0)
                    .with_unit("breaths/min"),
                FieldSpec::number("systolic_bp", "Systolic BP", 40.0, 300.0).with_unit("mmHg"),
                FieldSpec::number("diastolic_bp", "Diastolic BP", 20.0, 200.0).with_unit("mmHg"),
                FieldSpec::integer("age", "Age", 18.0, 120.0).with_unit("years"),
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
                    "Low Risk",
                    "30-day mortality 0.6-2.7%.",
                )
                .recommend(&["Consider outpatient treatment."]),
                Band::new(
                    2.0,
                    SeverityTier::Moderate,
                    "Moderate Risk",
                    "30-day mortality about 6.8%.",
                )
                .recommend(&["Consider short inpatient stay or closely supervised outpatient care."]),
                Band::new(
                    3.0,
                    SeverityTier::High,
                    "High Risk",
                    "30-day mortality 14-27.8%.",
                )
                .recommend(&["Hospitalize.", "Assess for ICU admission, especially if score 4-5."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 5.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let low_bp =
            inputs.number("systolic_bp") < 90.0 || inputs.number("diastolic_bp") <= 60.0;

        let mut sum = WeightedSum::new();
        sum.add("confusion", "Confusion", 1.0, inputs.yes("confusion"))
            .add("bun", "BUN > 19 mg/dL", 1.0, inputs.number("bun") > 19.0)
            .add(
                "respiratory_rate",
                "Respiratory rate ≥ 30",
                1.0,
                inputs.number("respiratory_rate") >= 30.0,
            )
            .add("blood_pressure", "SBP < 90 or DBP ≤ 60 mmHg", 1.0, low_bp)
            .add("age", "Age ≥ 65", 1.0, inputs.number("age") >= 65.0);

        let score = sum.total();
        ScoreResult::from_band(score, self.bands().classify(score))
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
