use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier, round1};
use medcalc_core::scoring::LinearPredictor;

use crate::Calculator;
use crate::inputs::Inputs;

/// Mayo Clinic model for malignancy of a solitary pulmonary nodule.
/// Logistic regression; the classified score is the probability in percent.
pub struct MayoSpn;

const INTERCEPT: f64 = -6.8272;

impl Calculator for MayoSpn {
    fn id(&self) -> &str {
        "mayo_spn"
    }

    fn name(&self) -> &str {
        "Mayo Clinic Solitary Pulmonary Nodule Malignancy Risk"
    }

    fn description(&self) -> &str {
        "Estimates the probability that an indeterminate pulmonary nodule is malignant."
    }

    fn reference(&self) -> &str {
        "Swensen SJ, Silverstein MD, Ilstrup DM, Schleck CD, Edell ES. The probability of \
         malignancy in solitary pulmonary nodules. Arch Intern Med. 1997;157(8):849-855."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::integer("age", "Age", 18.0, 100.0).with_unit("years"),
                FieldSpec::yes_no("smoker", "Current or former smoker"),
                FieldSpec::yes_no("prior_cancer", "Extrathoracic cancer over 5 years ago"),
                FieldSpec::number("diameter", "Nodule diameter", 1.0, 100.0).with_unit("mm"),
                FieldSpec::yes_no("spiculation", "Spiculated margin"),
                FieldSpec::yes_no("upper_lobe", "Upper lobe location"),
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
                    "Low Probability (<5%)",
                    "Malignancy is unlikely.",
                )
                .recommend(&["Surveillance with serial CT."]),
                Band::new(
                    5.0,
                    SeverityTier::Moderate,
                    "Intermediate Probability (5-65%)",
                    "Malignancy cannot be excluded.",
                )
                .recommend(&["Consider PET-CT or non-surgical biopsy."]),
                Band::new(
                    65.0,
                    SeverityTier::High,
                    "High Probability (>65%)",
                    "Malignancy is likely.",
                )
                .recommend(&["Refer for surgical evaluation."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::new(0.0, 100.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let mut model = LinearPredictor::new(INTERCEPT);
        model
            .term("age", "Age", 0.0391, inputs.number("age"))
            .flag("smoker", "Smoker", 0.7917, inputs.yes("smoker"))
            .flag("prior_cancer", "Prior extrathoracic cancer", 1.3388, inputs.yes("prior_cancer"))
            .term("diameter", "Diameter", 0.1274, inputs.number("diameter"))
            .flag("spiculation", "Spiculation", 1.0407, inputs.yes("spiculation"))
            .flag("upper_lobe", "Upper lobe", 0.7838, inputs.yes("upper_lobe"));

        let linear = model.value();
        let exact = model.probability_percent();
        let probability = round1(exact);
        ScoreResult::from_band(probability, self.bands().classify(exact))
            .with_probability(probability)
            .with_subscore("linear_predictor", linear)
            .with_breakdown(model.into_terms())
            .with_reference(self.reference())
    }
}
