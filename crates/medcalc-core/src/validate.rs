use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::field::{FieldKind, FieldSpec, FieldValue, ValueRange};

/// Whether surrounding whitespace is stripped before a raw value is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TrimPolicy {
    #[default]
    Trim,
    Preserve,
}

/// Why a raw input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldErrorKind {
    Required,
    NotANumber,
    OutOfRange { min: f64, max: f64 },
    NotAnInteger,
    InvalidOption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(spec: &FieldSpec, kind: FieldErrorKind) -> Self {
        let label = &spec.label;
        let message = match kind {
            FieldErrorKind::Required => format!("{label} is required."),
            FieldErrorKind::NotANumber => format!("{label} must be a number."),
            FieldErrorKind::OutOfRange { min, max } => {
                format!("{label} must be between {min} and {max}.")
            }
            FieldErrorKind::NotAnInteger => format!("{label} must be an integer."),
            FieldErrorKind::InvalidOption => format!("{label} must be a valid option."),
        };
        Self {
            field: spec.name.clone(),
            kind,
            message,
        }
    }
}

/// Validate one raw input against its declaration.
///
/// Checks run in a fixed order: presence, numeric parse, range, integrality
/// (integer fields), option membership (choice fields). The first failing
/// check determines the error.
pub fn validate_field(
    spec: &FieldSpec,
    raw: &str,
    trim: TrimPolicy,
) -> Result<FieldValue, FieldError> {
    let input = match trim {
        TrimPolicy::Trim => raw.trim(),
        TrimPolicy::Preserve => raw,
    };
    if input.is_empty() {
        return Err(FieldError::new(spec, FieldErrorKind::Required));
    }

    match &spec.kind {
        FieldKind::Number { range } => parse_in_range(spec, input, range).map(FieldValue::Number),
        FieldKind::Integer { range } => {
            let value = parse_in_range(spec, input, range)?;
            if value.fract() != 0.0 {
                return Err(FieldError::new(spec, FieldErrorKind::NotAnInteger));
            }
            Ok(FieldValue::Integer(value as i64))
        }
        FieldKind::Choice { options } => options
            .iter()
            .find(|o| o.value == input)
            .map(|o| FieldValue::Choice(o.value.clone()))
            .ok_or_else(|| FieldError::new(spec, FieldErrorKind::InvalidOption)),
    }
}

fn parse_in_range(spec: &FieldSpec, input: &str, range: &ValueRange) -> Result<f64, FieldError> {
    // `f64::from_str` accepts "inf" and "NaN"; neither is a usable measurement.
    let value = input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::new(spec, FieldErrorKind::NotANumber))?;

    if !range.contains(value) {
        return Err(FieldError::new(
            spec,
            FieldErrorKind::OutOfRange {
                min: range.min,
                max: range.max,
            },
        ));
    }
    Ok(value)
}
