use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::WeightedSum;

use crate::Calculator;
use crate::inputs::Inputs;

/// PERC: Pulmonary Embolism Rule-out Criteria. Eight criteria; PE can be
/// ruled out in low-pretest-probability patients only when none is present.
pub struct Perc;

impl Calculator for Perc {
    fn id(&self) -> &str {
        "perc"
    }

    fn name(&self) -> &str {
        "PERC Rule"
    }

    fn description(&self) -> &str {
        "Rules out pulmonary embolism in patients with low pretest probability."
    }

    fn reference(&self) -> &str {
        "Kline JA, Mitchell AM, Kabrhel C, Richman PB, Courtney DM. Clinical criteria to \
         prevent unnecessary diagnostic testing in emergency department patients with \
         suspected pulmonary embolism. J Thromb Haemost. 2004;2(8):1247-1255."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::integer("age", "Age", 18.0, 120.0).with_unit("years"),
                FieldSpec::number("heart_rate", "Heart rate", 20.0, 300.0).with_unit("bpm"),
                FieldSpec::number("oxygen_saturation", "Oxygen saturation", 50.0, 100.0)
                    .with_unit("%")
                    .with_helper("On room air"),
                FieldSpec::yes_no("unilateral_leg_swelling", "Unilateral leg swelling"),
                FieldSpec::yes_no("hemoptysis", "Hemoptysis"),
                FieldSpec::yes_no(
                    "recent_surgery_trauma",
                    "Surgery or trauma within 4 weeks",
                )
                .with_helper("Requiring general anesthesia"),
                FieldSpec::yes_no("prior_vte", "Prior PE or DVT"),
                FieldSpec::yes_no("hormone_use", "Hormone use")
                    .with_helper("Oral contraceptives, hormone replacement or estrogen"),
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
                    "PERC Negative",
                    "No criteria present. If pretest probability is low (<15%), PE is ruled \
                     out without further testing.",
                ),
                Band::new(
                    1.0,
                    SeverityTier::Moderate,
                    "PERC Positive",
                    "At least one criterion present. PE cannot be ruled out by PERC.",
                )
                .recommend(&["Obtain a D-dimer or proceed per Wells/Geneva pathway."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 8.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let mut sum = WeightedSum::new();
        sum.add("age", "Age ≥ 50", 1.0, inputs.number("age") >= 50.0)
            .add("heart_rate", "Heart rate ≥ 100", 1.0, inputs.number("heart_rate") >= 100.0)
            .add(
                "oxygen_saturation",
                "SaO2 < 95%",
                1.0,
                inputs.number("oxygen_saturation") < 95.0,
            )
            .add(
                "unilateral_leg_swelling",
                "Unilateral leg swelling",
                1.0,
                inputs.yes("unilateral_leg_swelling"),
            )
            .add("hemoptysis", "Hemoptysis", 1.0, inputs.yes("hemoptysis"))
            .add(
                "recent_surgery_trauma",
                "Recent surgery or trauma",
                1.0,
                inputs.yes("recent_surgery_trauma"),
            )
            .add("prior_vte", "Prior PE or DVT", 1.0, inputs.yes("prior_vte"))
            .add("hormone_use", "Hormone use", 1.0, inputs.yes("hormone_use"));

        let score = sum.total();
        ScoreResult::from_band(score, self.bands().classify(score))
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
