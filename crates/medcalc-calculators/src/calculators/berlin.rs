use std::sync::LazyLock;

use medcalc_core::bands::{Band, BandTable};
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::{ScoreResult, SeverityTier, round1};
use medcalc_core::scoring::WeightedSum;

use crate::Calculator;
use crate::inputs::Inputs;

/// Berlin Questionnaire: obstructive sleep apnea screening.
/// Three symptom categories (snoring, daytime sleepiness, hypertension/BMI);
/// two or more positive categories = high risk.
pub struct Berlin;

const FREQUENCY: &[(&str, &str)] = &[
    ("never", "Never or nearly never"),
    ("rarely", "1-2 times a month"),
    ("sometimes", "1-2 times a week"),
    ("frequent", "3-4 times a week"),
    ("almost_daily", "Nearly every day"),
];

/// Three or more times a week.
fn frequent(inputs: &Inputs, field: &str) -> bool {
    matches!(inputs.choice(field), "frequent" | "almost_daily")
}

impl Calculator for Berlin {
    fn id(&self) -> &str {
        "berlin"
    }

    fn name(&self) -> &str {
        "Berlin Questionnaire"
    }

    fn description(&self) -> &str {
        "Identifies adults at high risk for obstructive sleep apnea."
    }

    fn reference(&self) -> &str {
        "Netzer NC, Stoohs RA, Netzer CM, Clark K, Strohl KP. Using the Berlin Questionnaire \
         to identify patients at risk for the sleep apnea syndrome. Ann Intern Med. \
         1999;131(7):485-491."
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::yes_no("snoring", "Do you snore?"),
                FieldSpec::choice(
                    "snoring_loudness",
                    "Snoring loudness",
                    &[
                        ("slightly_louder", "Slightly louder than breathing"),
                        ("as_loud_as_talking", "As loud as talking"),
                        ("louder", "Louder than talking"),
                        ("very_loud", "Very loud, heard in adjacent rooms"),
                    ],
                ),
                FieldSpec::choice("snoring_frequency", "Snoring frequency", FREQUENCY),
                FieldSpec::yes_no("snoring_bothers", "Snoring bothers other people"),
                FieldSpec::yes_no(
                    "snoring_witnessed",
                    "Breathing pauses noticed during sleep",
                )
                .with_helper("Has anyone noticed that you quit breathing during your sleep?"),
                FieldSpec::choice(
                    "drowsy_daily",
                    "Tired or fatigued after sleeping",
                    FREQUENCY,
                ),
                FieldSpec::choice(
                    "fall_asleep_sitting",
                    "Fallen asleep while sitting",
                    FREQUENCY,
                )
                .with_helper("How often do you nod off or fall asleep while sitting quietly?"),
                FieldSpec::yes_no("drowsy_driving", "Nodded off while driving"),
                FieldSpec::number("height", "Height", 100.0, 250.0).with_unit("cm"),
                FieldSpec::number("weight", "Weight", 30.0, 300.0).with_unit("kg"),
                FieldSpec::yes_no("hypertension", "High blood pressure"),
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
                    "Fewer than two symptom categories are positive: low risk of obstructive \
                     sleep apnea.",
                )
                .recommend(&["Reassess if symptoms change."]),
                Band::new(
                    2.0,
                    SeverityTier::High,
                    "High Risk",
                    "Two or more symptom categories are positive: high risk of obstructive \
                     sleep apnea.",
                )
                .recommend(&[
                    "Refer for polysomnography or home sleep apnea testing.",
                    "Counsel on drowsy driving.",
                ]),
            ])
        });
        &BANDS
    }

    fn score_bounds(&self) -> ValueRange {
        ValueRange::stepped(0.0, 3.0, 1.0)
    }

    fn score(&self, inputs: &Inputs) -> ScoreResult {
        let mut snoring = WeightedSum::new();
        snoring
            .add("snoring", "Snores", 1.0, inputs.yes("snoring"))
            .add(
                "snoring_loudness",
                "Snoring louder than talking",
                1.0,
                matches!(inputs.choice("snoring_loudness"), "louder" | "very_loud"),
            )
            .add(
                "snoring_frequency",
                "Snores 3 or more times a week",
                1.0,
                frequent(inputs, "snoring_frequency"),
            )
            .add(
                "snoring_bothers",
                "Snoring bothers others",
                1.0,
                inputs.yes("snoring_bothers"),
            )
            .add(
                "snoring_witnessed",
                "Witnessed breathing pauses",
                1.0,
                inputs.yes("snoring_witnessed"),
            );

        let mut sleepiness = WeightedSum::new();
        sleepiness
            .add(
                "drowsy_daily",
                "Tired after sleeping 3 or more times a week",
                1.0,
                frequent(inputs, "drowsy_daily"),
            )
            .add(
                "fall_asleep_sitting",
                "Falls asleep sitting 3 or more times a week",
                1.0,
                frequent(inputs, "fall_asleep_sitting"),
            )
            .add(
                "drowsy_driving",
                "Nodded off while driving",
                1.0,
                inputs.yes("drowsy_driving"),
            );

        let height_m = inputs.number("height") / 100.0;
        let bmi = inputs.number("weight") / (height_m * height_m);
        let mut body = WeightedSum::new();
        body.add(
            "hypertension",
            "High blood pressure",
            1.0,
            inputs.yes("hypertension"),
        )
        .add("bmi", "BMI above 30 kg/m²", 1.0, bmi > 30.0);

        let categories = [
            ("Snoring", snoring.total() >= 2.0),
            ("Daytime sleepiness", sleepiness.total() >= 2.0),
            ("Hypertension or obesity", body.total() >= 1.0),
        ];
        let positive: Vec<&str> = categories
            .iter()
            .filter(|(_, positive)| *positive)
            .map(|(name, _)| *name)
            .collect();
        let score = positive.len() as f64;

        let note = if positive.is_empty() {
            "No category is positive.".to_string()
        } else {
            format!("Positive categories: {}.", positive.join(", "))
        };

        let (category1, category2, category3) = (snoring.total(), sleepiness.total(), body.total());
        let mut breakdown = snoring.into_criteria();
        breakdown.extend(sleepiness.into_criteria());
        breakdown.extend(body.into_criteria());

        ScoreResult::from_band(score, self.bands().classify(score))
            .with_subscore("category_1", category1)
            .with_subscore("category_2", category2)
            .with_subscore("category_3", category3)
            .with_subscore("bmi", round1(bmi))
            .with_note(&note)
            .with_breakdown(breakdown)
            .with_reference(self.reference())
    }
}
