//! Building blocks for the two scoring families: weighted-threshold sums and
//! logistic risk models.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A criterion or model term that contributed to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    pub points: f64,
}

/// Accumulates points for the criteria that are met.
#[derive(Debug, Clone, Default)]
pub struct WeightedSum {
    total: f64,
    met: Vec<Criterion>,
}

impl WeightedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` when `condition` holds.
    pub fn add(&mut self, id: &str, label: &str, points: f64, condition: bool) -> &mut Self {
        if condition {
            self.add_points(id, label, points);
        }
        self
    }

    /// Add a computed contribution. Zero contributions are not recorded.
    pub fn add_points(&mut self, id: &str, label: &str, points: f64) -> &mut Self {
        if points != 0.0 {
            self.total += points;
            self.met.push(Criterion {
                id: id.to_string(),
                label: label.to_string(),
                points,
            });
        }
        self
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.met
    }

    pub fn into_criteria(self) -> Vec<Criterion> {
        self.met
    }
}

/// Points for the highest threshold `value` reaches. `tiers` is ascending by
/// threshold; below the first threshold scores zero.
pub fn points_at_or_above(value: f64, tiers: &[(f64, f64)]) -> f64 {
    tiers
        .iter()
        .rev()
        .find(|(threshold, _)| value >= *threshold)
        .map_or(0.0, |(_, points)| *points)
}

/// Points for the lowest threshold `value` falls under. `tiers` is
/// descending by threshold; at or above the first threshold scores zero.
pub fn points_below(value: f64, tiers: &[(f64, f64)]) -> f64 {
    tiers
        .iter()
        .rev()
        .find(|(threshold, _)| value < *threshold)
        .map_or(0.0, |(_, points)| *points)
}

/// Logistic function `exp(x) / (1 + exp(x))`, evaluated without overflow for
/// large |x|.
pub fn logistic(linear: f64) -> f64 {
    if linear >= 0.0 {
        1.0 / (1.0 + (-linear).exp())
    } else {
        let e = linear.exp();
        e / (1.0 + e)
    }
}

/// Linear predictor of a logistic regression model.
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    intercept: f64,
    terms: Vec<Criterion>,
}

impl LinearPredictor {
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            terms: Vec::new(),
        }
    }

    /// Add `coefficient * x` to the predictor.
    pub fn term(&mut self, id: &str, label: &str, coefficient: f64, x: f64) -> &mut Self {
        self.terms.push(Criterion {
            id: id.to_string(),
            label: label.to_string(),
            points: coefficient * x,
        });
        self
    }

    /// Add `coefficient` when `present` holds, for indicator variables.
    pub fn flag(&mut self, id: &str, label: &str, coefficient: f64, present: bool) -> &mut Self {
        self.term(id, label, coefficient, if present { 1.0 } else { 0.0 })
    }

    pub fn value(&self) -> f64 {
        self.intercept + self.terms.iter().map(|t| t.points).sum::<f64>()
    }

    /// Predicted probability as a percentage.
    pub fn probability_percent(&self) -> f64 {
        logistic(self.value()) * 100.0
    }

    pub fn into_terms(self) -> Vec<Criterion> {
        self.terms
    }
}
