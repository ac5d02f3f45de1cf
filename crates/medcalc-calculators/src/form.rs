//! Form controller: owns the raw inputs of one calculator instance, runs
//! field validation and gates scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use medcalc_core::result::ScoreResult;
use medcalc_core::validate::{FieldError, TrimPolicy, validate_field};

use crate::Calculator;
use crate::error::CalculatorError;
use crate::inputs::Inputs;

/// Form-level alert shown when a calculation is blocked by field errors.
pub const CORRECT_ERRORS_ALERT: &str = "Please correct the errors below.";

/// When field errors are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationMode {
    /// Validate the edited field on every change.
    OnChange,
    /// Validate everything when calculating.
    #[default]
    OnSubmit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormOptions {
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub trim: TrimPolicy,
}

/// Lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormPhase {
    /// Untouched since mount or reset.
    Idle,
    /// Edited, with at least one field failing validation.
    Editing,
    /// Every field passes validation; no result yet.
    Ready,
    /// A result is available for the current inputs.
    Computed,
}

/// Field name → error message for every field currently in error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, field: &str, error: Option<FieldError>) {
        match error {
            Some(e) => {
                self.errors.insert(field.to_string(), e.message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }
}

/// One live instance of a calculator form.
pub struct FormController {
    calculator: Box<dyn Calculator>,
    options: FormOptions,
    values: BTreeMap<String, String>,
    errors: ValidationResult,
    alert: Option<String>,
    result: Option<ScoreResult>,
    touched: bool,
}

impl FormController {
    pub fn new(calculator: Box<dyn Calculator>, options: FormOptions) -> Self {
        let values = default_values(calculator.as_ref());
        Self {
            calculator,
            options,
            values,
            errors: ValidationResult::default(),
            alert: None,
            result: None,
            touched: false,
        }
    }

    pub fn calculator(&self) -> &dyn Calculator {
        self.calculator.as_ref()
    }

    /// Store a raw value for a field.
    ///
    /// Drops any previous result and alert. In [`ValidationMode::OnChange`]
    /// the field is re-validated immediately; in [`ValidationMode::OnSubmit`]
    /// its error is cleared until the next calculation.
    pub fn set_field(&mut self, name: &str, raw: impl Into<String>) -> Result<(), CalculatorError> {
        let Some(spec) = self.calculator.field(name) else {
            return Err(CalculatorError::UnknownField {
                calculator_id: self.calculator.id().to_string(),
                field: name.to_string(),
            });
        };
        let raw = raw.into();

        let error = match self.options.validation_mode {
            ValidationMode::OnChange => validate_field(spec, &raw, self.options.trim).err(),
            ValidationMode::OnSubmit => None,
        };
        self.errors.record(name, error);

        self.values.insert(name.to_string(), raw);
        self.result = None;
        self.alert = None;
        self.touched = true;
        Ok(())
    }

    /// Validate every field and, if all pass, score them.
    ///
    /// Returns `None` when validation blocked the calculation; the field
    /// errors and the form-level alert are then available through
    /// [`errors`](Self::errors) and [`alert`](Self::alert).
    pub fn calculate(&mut self) -> Option<&ScoreResult> {
        match self.validate_all() {
            Ok(inputs) => {
                let result = self.calculator.score(&inputs);
                debug!(
                    calculator = self.calculator.id(),
                    score = result.raw_score,
                    tier = result.tier.as_str(),
                    "score calculated"
                );
                self.errors = ValidationResult::default();
                self.alert = None;
                self.result = Some(result);
            }
            Err(errors) => {
                debug!(
                    calculator = self.calculator.id(),
                    errors = errors.len(),
                    "calculation blocked by invalid fields"
                );
                self.errors = errors;
                self.alert = Some(CORRECT_ERRORS_ALERT.to_string());
                self.result = None;
            }
        }
        self.touched = true;
        self.result.as_ref()
    }

    /// Restore defaults and clear errors, alert and result.
    pub fn reset(&mut self) {
        debug!(calculator = self.calculator.id(), "form reset");
        self.values = default_values(self.calculator.as_ref());
        self.errors = ValidationResult::default();
        self.alert = None;
        self.result = None;
        self.touched = false;
    }

    pub fn phase(&self) -> FormPhase {
        if self.result.is_some() {
            FormPhase::Computed
        } else if !self.touched {
            FormPhase::Idle
        } else if self.validate_all().is_ok() {
            FormPhase::Ready
        } else {
            FormPhase::Editing
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    fn validate_all(&self) -> Result<Inputs, ValidationResult> {
        let mut inputs = Inputs::new();
        let mut errors = ValidationResult::default();
        for spec in self.calculator.fields() {
            let raw = self.value(&spec.name).unwrap_or_default();
            match validate_field(spec, raw, self.options.trim) {
                Ok(value) => inputs.insert(&spec.name, value),
                Err(e) => errors.record(&spec.name, Some(e)),
            }
        }
        if errors.is_valid() {
            Ok(inputs)
        } else {
            Err(errors)
        }
    }
}

fn default_values(calculator: &dyn Calculator) -> BTreeMap<String, String> {
    calculator
        .fields()
        .iter()
        .filter_map(|f| f.default.clone().map(|d| (f.name.clone(), d)))
        .collect()
}
