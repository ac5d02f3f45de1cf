use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SchemaError;
use crate::validate::{TrimPolicy, validate_field};

/// Inclusive numeric range, optionally quantised to a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    pub const fn stepped(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: Some(step),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    /// Every point from `min` to `max`, spaced by the range's step or by
    /// `fallback` when the range is continuous.
    pub fn points(&self, fallback: f64) -> Vec<f64> {
        let step = self.step.unwrap_or(fallback);
        if step <= 0.0 || self.max < self.min {
            return vec![self.min];
        }
        let count = ((self.max - self.min) / step + 1e-9).floor() as usize;
        (0..=count).map(|i| self.min + i as f64 * step).collect()
    }
}

/// One selectable value of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Any finite number within the range.
    Number { range: ValueRange },
    /// A whole number within the range.
    Integer { range: ValueRange },
    /// One of a closed set of option values.
    Choice { options: Vec<FieldOption> },
}

/// Declaration of a single form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Display-only unit, e.g. "kg" or "mg/dL".
    pub unit: Option<String>,
    pub helper_text: Option<String>,
    /// Raw value pre-filled into the form on mount and reset.
    pub default: Option<String>,
}

impl FieldSpec {
    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            unit: None,
            helper_text: None,
            default: None,
        }
    }

    pub fn number(name: &str, label: &str, min: f64, max: f64) -> Self {
        Self::with_kind(
            name,
            label,
            FieldKind::Number {
                range: ValueRange::new(min, max),
            },
        )
    }

    pub fn integer(name: &str, label: &str, min: f64, max: f64) -> Self {
        Self::with_kind(
            name,
            label,
            FieldKind::Integer {
                range: ValueRange::new(min, max),
            },
        )
    }

    pub fn choice(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(value, label)| FieldOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();
        Self::with_kind(name, label, FieldKind::Choice { options })
    }

    pub fn yes_no(name: &str, label: &str) -> Self {
        Self::choice(name, label, &[("yes", "Yes"), ("no", "No")])
    }

    pub fn sex(name: &str) -> Self {
        Self::choice(name, "Sex", &[("male", "Male"), ("female", "Female")])
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_helper(mut self, text: &str) -> Self {
        self.helper_text = Some(text.to_string());
        self
    }

    pub fn with_default(mut self, raw: &str) -> Self {
        self.default = Some(raw.to_string());
        self
    }

    /// The numeric range, or `None` for choice fields.
    /// Check the declaration invariants: min ≤ max, non-empty options, and a
    /// default that would itself pass validation.
    pub fn check(&self) -> Result<(), SchemaError> {
        match &self.kind {
            FieldKind::Number { range } | FieldKind::Integer { range } => {
                if range.min > range.max {
                    return Err(SchemaError::InvertedRange {
                        field: self.name.clone(),
                        min: range.min,
                        max: range.max,
                    });
                }
            }
            FieldKind::Choice { options } => {
                if options.is_empty() {
                    return Err(SchemaError::NoOptions(self.name.clone()));
                }
            }
        }

        if let Some(default) = &self.default
            && let Err(e) = validate_field(self, default, TrimPolicy::Preserve)
        {
            return Err(SchemaError::InvalidDefault {
                field: self.name.clone(),
                value: default.clone(),
                message: e.message,
            });
        }

        Ok(())
    }
}

/// A raw input after it passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Choice(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Number(v) => Some(*v),
            FieldValue::Choice(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(v) => Some(v),
            _ => None,
        }
    }
}
