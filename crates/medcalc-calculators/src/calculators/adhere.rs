use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::WeightedSum;

use crate::Calculator;
use crate::inputs::Inputs;

/// ADHERE: in-hospital mortality in acute decompensated heart failure.
/// One point each for BUN ≥ 43 mg/dL, SBP < 115 mmHg, creatinine ≥ 2.75 mg/dL.
pub struct Adhere;

const BUN_CUTOFF: f64 = 43.0;
const SBP_CUTOFF: f64 = 115.0;
const CREATININE_CUTOFF: f64 = 2.75;

/// In-hospital mortality (%) of the ADHERE classification-tree terminal node.
fn tree_mortality(high_bun: bool, low_sbp: bool, high_creatinine: bool) -> f64 {
    match (high_bun, low_sbp, high_creatinine) {
        (false, false, _) => 2.14,
        (false, true, _) => 5.49,
        (true, false, _) => 6.41,
        (true, true, false) => 12.42,
        (true, true, true) => 21.94,
    }
}

impl Calculator for Adhere {
    fn id(&self) -> &str {
        "adhere"
    }

    fn name(&self) -> &str {
        "ADHERE Algorithm"
    }

    fn description(&self) -> &str {
        "Stratifies in-hospital mortality for acute decompensated heart failure."
    }

    fn reference(&self) -> &str {
        "Fonarow GC, Adams KF Jr, Abraham WT, Yancy CW, Boscardin WJ. Risk stratification \
         for in-hospital mortality in acutely decompensated heart failure: classification \
         and regression tree analysis. JAMA. 2005;293(5):572-580."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("bun", "BUN", 1.0, 300.0).with_unit("mg/dL"),
                FieldSpec::number("systolic_bp", "Systolic BP", 40.0, 300.0).with_unit("mmHg"),
                FieldSpec::number("creatinine", "Creatinine", 0.1, 20.0).with_unit("mg/dL"),
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
                    "No ADHERE risk factors. In-hospital mortality about 2%.",
                ),
                Band::new(
                    1.0,
                    SeverityTier::Moderate,
                    "Intermediate Risk",
                    "One ADHERE risk factor. In-hospital mortality about 5-6%.",
                )
                .recommend(&["Monitor closely for decompensation."]),
                Band::new(
                    2.0,
                    SeverityTier::High,
                    "High Risk",
                    "Two ADHERE risk factors. In-hospital mortality up to about 12%.",
                )
                .recommend(&["Consider intensive monitoring.", "Optimize decongestion early."]),
                Band::new(
                    3.0,
                    SeverityTier::VeryHigh,
                    "Very High Risk",
                    "All three ADHERE risk factors. In-hospital mortality about 22%.",
                )
                .recommend(&["Consider ICU-level care.", "Discuss goals of care."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 3.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let high_bun = inputs.number("bun") >= BUN_CUTOFF;
        let low_sbp = inputs.number("systolic_bp") < SBP_CUTOFF;
        let high_creatinine = inputs.number("creatinine") >= CREATININE_CUTOFF;

        let mut sum = WeightedSum::new();
        sum.add("bun", "BUN ≥ 43 mg/dL", 1.0, high_bun)
            .add("systolic_bp", "Systolic BP < 115 mmHg", 1.0, low_sbp)
            .add("creatinine", "Creatinine ≥ 2.75 mg/dL", 1.0, high_creatinine);

        let score = sum.total();
        ScoreResult::from_band(score, self.bands().classify(score))
            .with_probability(tree_mortality(high_bun, low_sbp, high_creatinine))
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
