//! medcalc-calculators
//!
//! Clinical score calculator definitions and the form controller that drives
//! them. Each calculator is a static field table, a classification table and
//! a pure scoring function.

pub mod calculators;
pub mod error;
pub mod form;
pub mod inputs;

use std::collections::HashSet;

use medcalc_core::bands::BandTable;
use medcalc_core::error::SchemaError;
use medcalc_core::field::{FieldSpec, ValueRange};
use medcalc_core::result::ScoreResult;

use error::CalculatorError;
use inputs::Inputs;

/// Trait implemented by each clinical score calculator.
pub trait Calculator: Send + Sync {
    /// Unique identifier for this calculator (e.g., "berlin", "ckd_epi").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Berlin Questionnaire").
    fn name(&self) -> &str;

    /// One-line description of what the score is for.
    fn description(&self) -> &str;

    /// Citation for the published model. Display-only.
    fn reference(&self) -> &str;

    /// The inputs this calculator collects, in display order.
    fn fields(&self) -> &[FieldSpec];

    /// Classification of the primary score.
    fn bands(&self) -> &BandTable;

    /// Inclusive range of attainable primary scores.
    fn score_bounds(&self) -> ValueRange;

    /// Score validated inputs. Only called once every field has passed
    /// validation, so `inputs` holds a value for every declared field.
    fn score(&self, inputs: &Inputs) -> ScoreResult;

    fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Check every field declaration and the band table.
    fn check_schema(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in self.fields() {
            field.check()?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        self.bands().check(&self.score_bounds())
    }

    /// Format a result as the text of a results panel.
    fn render_summary(&self, result: &ScoreResult) -> String {
        let mut output = format!("## {}\n\n", self.name());
        output.push_str(&format!("Score: {}\n", result.raw_score));
        if let Some(probability) = result.probability {
            output.push_str(&format!("Probability: {probability:.1}%\n"));
        }
        for (name, value) in &result.subscores {
            output.push_str(&format!("- {name}: {value}\n"));
        }
        output.push_str(&format!("\n**{}**\n\n{}\n", result.label, result.interpretation));
        if !result.recommendations.is_empty() {
            output.push_str("\n### Recommendations\n");
            for item in &result.recommendations {
                output.push_str(&format!("- {item}\n"));
            }
        }
        output.push_str(&format!("\nReference: {}\n", self.reference()));
        output
    }
}

/// Return all registered calculators.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(calculators::berlin::Berlin),
        Box::new(calculators::diarem::DiaRem),
        Box::new(calculators::adhere::Adhere),
        Box::new(calculators::perc::Perc),
        Box::new(calculators::curb65::Curb65),
        Box::new(calculators::psi::Psi),
        Box::new(calculators::bode::Bode),
        Box::new(calculators::ckd_epi::CkdEpi),
        Box::new(calculators::mayo_spn::MayoSpn),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    all_calculators().into_iter().find(|c| c.id() == id)
}

/// Look up a calculator by ID, failing with [`CalculatorError::UnknownCalculator`].
pub fn require_calculator(id: &str) -> Result<Box<dyn Calculator>, CalculatorError> {
    get_calculator(id).ok_or_else(|| CalculatorError::UnknownCalculator(id.to_string()))
}

/// Check the schema of every registered calculator.
pub fn check_registry() -> Result<(), CalculatorError> {
    let mut ids = HashSet::new();
    for calculator in all_calculators() {
        if !ids.insert(calculator.id().to_string()) {
            return Err(CalculatorError::DuplicateId(calculator.id().to_string()));
        }
        calculator
            .check_schema()
            .map_err(|source| CalculatorError::Schema {
                calculator_id: calculator.id().to_string(),
                source,
            })?;
    }
    tracing::debug!(count = ids.len(), "calculator registry checked");
    Ok(())
}
