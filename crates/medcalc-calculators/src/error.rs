use medcalc_core::error::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("unknown field '{field}' for calculator '{calculator_id}'")]
    UnknownField {
        calculator_id: String,
        field: String,
    },

    #[error("duplicate calculator id: {0}")]
    DuplicateId(String),

    #[error("invalid schema for calculator '{calculator_id}': {source}")]
    Schema {
        calculator_id: String,
        #[source]
        source: SchemaError,
    },
}
