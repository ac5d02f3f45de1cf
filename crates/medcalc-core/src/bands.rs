use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SchemaError;
use crate::field::ValueRange;
use crate::result::SeverityTier;

/// One classification band. Covers scores from `lower` (inclusive) up to the
/// next band's `lower` (exclusive); the last band is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub lower: f64,
    pub tier: SeverityTier,
    pub label: String,
    pub interpretation: String,
    pub recommendations: Vec<String>,
}

impl Band {
    pub fn new(lower: f64, tier: SeverityTier, label: &str, interpretation: &str) -> Self {
        Self {
            lower,
            tier,
            label: label.to_string(),
            interpretation: interpretation.to_string(),
            recommendations: Vec::new(),
        }
    }

    pub fn recommend(mut self, items: &[&str]) -> Self {
        self.recommendations = items.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Ordered classification table for one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandTable {
    pub bands: Vec<Band>,
}

impl BandTable {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    /// Map a score to its band.
    ///
    /// Scores below the first band (including NaN) fall back to the first
    /// band.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty. Tables are static calculator data and
    /// [`BandTable::check`] rejects empty ones, so a panic indicates a
    /// definition bug.
    pub fn classify(&self, score: f64) -> &Band {
        self.bands
            .iter()
            .rev()
            .find(|b| score >= b.lower)
            .or_else(|| self.bands.first())
            .unwrap_or_else(|| panic!("band table is empty"))
    }

    /// Number of bands whose half-open interval contains `score`.
    pub fn matching(&self, score: f64) -> usize {
        self.bands
            .iter()
            .enumerate()
            .filter(|(i, band)| {
                let upper = self.bands.get(i + 1).map(|next| next.lower);
                score >= band.lower && upper.is_none_or(|u| score < u)
            })
            .count()
    }

    /// Verify the table is contiguous and exhaustive over `bounds`: lower
    /// bounds strictly ascend, the first covers the minimum score and none
    /// starts beyond the maximum.
    pub fn check(&self, bounds: &ValueRange) -> Result<(), SchemaError> {
        let first = self.bands.first().ok_or(SchemaError::EmptyBands)?;
        if first.lower > bounds.min {
            return Err(SchemaError::UncoveredMinimum {
                lower: first.lower,
                min: bounds.min,
            });
        }

        for pair in self.bands.windows(2) {
            if pair[1].lower <= pair[0].lower {
                return Err(SchemaError::UnorderedBands {
                    previous: pair[0].lower,
                    next: pair[1].lower,
                });
            }
        }

        if let Some(band) = self.bands.iter().find(|b| b.lower > bounds.max) {
            return Err(SchemaError::UnreachableBand {
                label: band.label.clone(),
                lower: band.lower,
                max: bounds.max,
            });
        }

        Ok(())
    }
}
