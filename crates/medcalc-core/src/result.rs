use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bands::Band;
use crate::scoring::Criterion;

/// Severity of a classified score, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityTier {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl SeverityTier {
    /// Display color for the results panel.
    pub fn color(self) -> &'static str {
        match self {
            SeverityTier::Low => "green",
            SeverityTier::Moderate => "yellow",
            SeverityTier::High => "orange",
            SeverityTier::VeryHigh => "red",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::Low => "low",
            SeverityTier::Moderate => "moderate",
            SeverityTier::High => "high",
            SeverityTier::VeryHigh => "very_high",
        }
    }
}

/// The outcome of one calculation. Built fresh on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub raw_score: f64,
    /// Predicted probability as a percentage (0–100), for risk models.
    pub probability: Option<f64>,
    #[serde(default)]
    pub subscores: BTreeMap<String, f64>,
    pub label: String,
    pub tier: SeverityTier,
    pub color: String,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    /// Criteria or model terms that contributed to the score.
    #[serde(default)]
    pub breakdown: Vec<Criterion>,
    pub reference: String,
}

impl ScoreResult {
    /// Start a result from the band the score fell into.
    pub fn from_band(raw_score: f64, band: &Band) -> Self {
        Self {
            raw_score,
            probability: None,
            subscores: BTreeMap::new(),
            label: band.label.clone(),
            tier: band.tier,
            color: band.tier.color().to_string(),
            interpretation: band.interpretation.clone(),
            recommendations: band.recommendations.clone(),
            breakdown: Vec::new(),
            reference: String::new(),
        }
    }

    pub fn with_probability(mut self, percent: f64) -> Self {
        self.probability = Some(percent);
        self
    }

    pub fn with_subscore(mut self, name: &str, value: f64) -> Self {
        self.subscores.insert(name.to_string(), value);
        self
    }

    pub fn with_breakdown(mut self, breakdown: Vec<Criterion>) -> Self {
        self.breakdown = breakdown;
        self
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    /// Append a sentence to the band's canned interpretation.
    pub fn with_note(mut self, note: &str) -> Self {
        if !self.interpretation.is_empty() {
            self.interpretation.push(' ');
        }
        self.interpretation.push_str(note);
        self
    }
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
