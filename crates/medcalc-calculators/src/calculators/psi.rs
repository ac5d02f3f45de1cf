use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier};
use medcalc_core::scoring::WeightedSum;

use crate::Calculator;
use crate::inputs::Inputs;

/// PSI/PORT: Pneumonia Severity Index.
///
/// Points-based classes II–V; class I is assigned by rule (age ≤ 50, no
/// comorbidity, no abnormal exam finding) before any points are counted.
pub struct Psi;

const COMORBIDITIES: &[(&str, &str, f64)] = &[
    ("neoplastic_disease", "Neoplastic disease", 30.0),
    ("liver_disease", "Liver disease", 20.0),
    ("chf", "Congestive heart failure", 10.0),
    ("cerebrovascular_disease", "Cerebrovascular disease", 10.0),
    ("renal_disease", "Renal disease", 10.0),
];

static CLASS_ONE: LazyLock<Band> = LazyLock::new(|| {
    Band::new(
        0.0,
        SeverityTier::Low,
        "Risk Class I",
        "Age 50 or younger with no comorbidity or abnormal exam finding. 30-day mortality \
         about 0.1%.",
    )
    .recommend(&["Outpatient care."])
});

fn abnormal_exam(inputs: &Inputs) -> [(&'static str, &'static str, f64, bool); 5] {
    let temperature = inputs.number("temperature");
    [
        (
            "altered_mental_status",
            "Altered mental status",
            20.0,
            inputs.yes("altered_mental_status"),
        ),
        (
            "respiratory_rate",
            "Respiratory rate ≥ 30",
            20.0,
            inputs.number("respiratory_rate") >= 30.0,
        ),
        (
            "systolic_bp",
            "Systolic BP < 90 mmHg",
            20.0,
            inputs.number("systolic_bp") < 90.0,
        ),
        (
            "temperature",
            "Temperature < 35 °C or ≥ 40 °C",
            15.0,
            !(35.0..40.0).contains(&temperature),
        ),
        (
            "pulse",
            "Pulse ≥ 125 bpm",
            10.0,
            inputs.number("pulse") >= 125.0,
        ),
    ]
}

impl Calculator for Psi {
    fn id(&self) -> &str {
        "psi"
    }

    fn name(&self) -> &str {
        "Pneumonia Severity Index (PSI/PORT)"
    }

    fn description(&self) -> &str {
        "Stratifies 30-day mortality of community-acquired pneumonia."
    }

    fn reference(&self) -> &str {
        "Fine MJ, Auble TE, Yealy DM, et al. A prediction rule to identify low-risk patients \
         with community-acquired pneumonia. N Engl J Med. 1997;336(4):243-250."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::integer("age", "Age", 18.0, 120.0).with_unit("years"),
                FieldSpec::sex("sex"),
                FieldSpec::yes_no("nursing_home", "Nursing home resident"),
                FieldSpec::yes_no("neoplastic_disease", "Neoplastic disease"),
                FieldSpec::yes_no("liver_disease", "Liver disease"),
                FieldSpec::yes_no("chf", "Congestive heart failure"),
                FieldSpec::yes_no("cerebrovascular_disease", "Cerebrovascular disease"),
                FieldSpec::yes_no("renal_disease", "Renal disease"),
                FieldSpec::yes_no("altered_mental_status", "Altered mental status"),
                FieldSpec::integer("respiratory_rate", "Respiratory rate", 0.0, 80.0)
                    .with_unit("breaths/min"),
                FieldSpec::number("systolic_bp", "Systolic BP", 40.0, 300.0).with_unit("mmHg"),
                FieldSpec::number("temperature", "Temperature", 25.0, 45.0).with_unit("°C"),
                FieldSpec::integer("pulse", "Pulse", 20.0, 300.0).with_unit("bpm"),
                FieldSpec::number("arterial_ph", "Arterial pH", 6.5, 8.0),
                FieldSpec::number("bun", "BUN", 1.0, 300.0).with_unit("mg/dL"),
                FieldSpec::number("sodium", "Sodium", 100.0, 180.0).with_unit("mmol/L"),
                FieldSpec::number("glucose", "Glucose", 20.0, 2000.0).with_unit("mg/dL"),
                FieldSpec::number("hematocrit", "Hematocrit", 5.0, 70.0).with_unit("%"),
                FieldSpec::number("pao2", "PaO2", 20.0, 600.0)
                    .with_unit("mmHg")
                    .with_helper("SaO2 < 90% on pulse oximetry counts as PaO2 < 60 mmHg"),
                FieldSpec::yes_no("pleural_effusion", "Pleural effusion on imaging"),
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
                    "Risk Class II",
                    "70 points or fewer. 30-day mortality about 0.6%.",
                )
                .recommend(&["Outpatient care."]),
                Band::new(
                    71.0,
                    SeverityTier::Moderate,
                    "Risk Class III",
                    "71-90 points. 30-day mortality about 0.9-2.8%.",
                )
                .recommend(&["Outpatient care or brief observation admission."]),
                Band::new(
                    91.0,
                    SeverityTier::High,
                    "Risk Class IV",
                    "91-130 points. 30-day mortality about 8.2-9.3%.",
                )
                .recommend(&["Inpatient admission."]),
                Band::new(
                    131.0,
                    SeverityTier::VeryHigh,
                    "Risk Class V",
                    "More than 130 points. 30-day mortality about 27-31%.",
                )
                .recommend(&["Inpatient admission.", "Assess for ICU care."]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        // Youngest female with nothing abnormal, up to the oldest patient with
        // every finding present.
        ValueRange::stepped(8.0, 405.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let age = inputs.number("age");
        let female = inputs.is("sex", "female");
        let exam = abnormal_exam(inputs);

        let mut sum = WeightedSum::new();
        sum.add_points("age", "Age", age)
            .add("sex", "Female", -10.0, female)
            .add("nursing_home", "Nursing home resident", 10.0, inputs.yes("nursing_home"));
        for (id, label, points) in COMORBIDITIES {
            sum.add(id, label, *points, inputs.yes(id));
        }
        for (id, label, points, present) in exam {
            sum.add(id, label, points, present);
        }
        sum.add("arterial_ph", "Arterial pH < 7.35", 30.0, inputs.number("arterial_ph") < 7.35)
            .add("bun", "BUN ≥ 30 mg/dL", 20.0, inputs.number("bun") >= 30.0)
            .add("sodium", "Sodium < 130 mmol/L", 20.0, inputs.number("sodium") < 130.0)
            .add("glucose", "Glucose ≥ 250 mg/dL", 10.0, inputs.number("glucose") >= 250.0)
            .add("hematocrit", "Hematocrit < 30%", 10.0, inputs.number("hematocrit") < 30.0)
            .add("pao2", "PaO2 < 60 mmHg", 10.0, inputs.number("pao2") < 60.0)
            .add(
                "pleural_effusion",
                "Pleural effusion",
                10.0,
                inputs.yes("pleural_effusion"),
            );

        let class_one = age <= 50.0
            && !COMORBIDITIES.iter().any(|(id, _, _)| inputs.yes(id))
            && !exam.iter().any(|(_, _, _, present)| *present);

        let score = sum.total();
        let band = if class_one {
            &*CLASS_ONE
        } else {
            self.bands().classify(score)
        };
        let class = if class_one {
            1.0
        } else {
            match score {
                s if s <= 70.0 => 2.0,
                s if s <= 90.0 => 3.0,
                s if s <= 130.0 => 4.0,
                _ => 5.0,
            }
        };

        ScoreResult::from_band(score, band)
            .with_subscore("risk_class", class)
            .with_breakdown(sum.into_criteria())
            .with_reference(self.reference())
    }
}
