use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier, round1};

use crate::Calculator;
use crate::inputs::Inputs;

/// CKD-EPI 2021 creatinine equation (race-free), staged by KDIGO GFR
/// category. Lower eGFR is worse.
pub struct CkdEpi;

/// Sex-specific constants: (kappa, alpha, multiplier).
fn constants(female: bool) -> (f64, f64, f64) {
    if female {
        (0.7, -0.241, 1.012)
    } else {
        (0.9, -0.302, 1.0)
    }
}

/// eGFR in mL/min/1.73 m².
pub fn egfr(creatinine: f64, age: f64, female: bool) -> f64 {
    let (kappa, alpha, multiplier) = constants(female);
    let ratio = creatinine / kappa;
    142.0 * ratio.min(1.0).powf(alpha) * ratio.max(1.0).powf(-1.200) * 0.9938_f64.powf(age)
        * multiplier
}

impl Calculator for CkdEpi {
    fn id(&self) -> &str {
        "ckd_epi"
    }

    fn name(&self) -> &str {
        "CKD-EPI eGFR (2021)"
    }

    fn description(&self) -> &str {
        "Estimates glomerular filtration rate from serum creatinine, age and sex."
    }

    fn reference(&self) -> &str {
        "Inker LA, Eneanya ND, Coresh J, et al. New creatinine- and cystatin C-based \
         equations to estimate GFR without race. N Engl J Med. 2021;385(19):1737-1749."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("creatinine", "Serum creatinine", 0.2, 15.0)
                    .with_unit("mg/dL"),
                FieldSpec::integer("age", "Age", 18.0, 120.0).with_unit("years"),
                FieldSpec::sex("sex"),
            ]
        });
        &FIELDS
    }

    fn bands(&self) -> &BandTable {
        static BANDS: LazyLock<BandTable> = LazyLock::new(|| {
            BandTable::new(vec![
                Band::new(
                    0.0,
                    SeverityTier::VeryHigh,
                    "G5: Kidney failure",
                    "eGFR below 15 mL/min/1.73 m².",
                )
                .recommend(&["Refer to nephrology for kidney replacement therapy planning."]),
                Band::new(
                    15.0,
                    SeverityTier::VeryHigh,
                    "G4: Severely decreased",
                    "eGFR 15-29 mL/min/1.73 m².",
                )
                .recommend(&[
                    "Refer to nephrology.",
                    "Review renally cleared medication doses.",
                ]),
                Band::new(
                    30.0,
                    SeverityTier::High,
                    "G3b: Moderately to severely decreased",
                    "eGFR 30-44 mL/min/1.73 m².",
                )
                .recommend(&["Review renally cleared medication doses."]),
                Band::new(
                    45.0,
                    SeverityTier::Moderate,
                    "G3a: Mildly to moderately decreased",
                    "eGFR 45-59 mL/min/1.73 m².",
                ),
                Band::new(
                    60.0,
                    SeverityTier::Low,
                    "G2: Mildly decreased",
                    "eGFR 60-89 mL/min/1.73 m². CKD only with other markers of kidney damage.",
                ),
                Band::new(
                    90.0,
                    SeverityTier::Low,
                    "G1: Normal or high",
                    "eGFR 90 mL/min/1.73 m² or above.",
                ),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::new(0.0, 250.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let value = round1(egfr(
            inputs.number("creatinine"),
            inputs.number("age"),
            inputs.is("sex", "female"),
        ));
        ScoreResult::from_band(value, self.bands().classify(value))
            .with_reference(self.reference())
    }
}
