use thiserror::Error;

/// A calculator definition that breaks one of the schema invariants.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field '{field}': min {min} exceeds max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },

    #[error("field '{0}' declares no options")]
    NoOptions(String),

    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    #[error("default '{value}' for field '{field}' is invalid: {message}")]
    InvalidDefault {
        field: String,
        value: String,
        message: String,
    },

    #[error("band table is empty")]
    EmptyBands,

    #[error("band lower bounds must strictly ascend (found {previous} then {next})")]
    UnorderedBands { previous: f64, next: f64 },

    #[error("first band starts at {lower}, above the minimum score {min}")]
    UncoveredMinimum { lower: f64, min: f64 },

    #[error("band '{label}' starts at {lower}, above the maximum score {max}")]
    UnreachableBand { label: String, lower: f64, max: f64 },
}
