use std::collections::BTreeMap;

use medcalc_core::field::FieldValue;

/// Parsed, validated inputs handed to a scoring function.
///
/// The form controller only builds `Inputs` once every declared field has
/// validated, so lookups of declared fields always succeed. Lookups of
/// undeclared names read as `0.0` / `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: BTreeMap<String, FieldValue>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Numeric value of a number or integer field.
    pub fn number(&self, name: &str) -> f64 {
        self.values
            .get(name)
            .and_then(FieldValue::as_f64)
            .unwrap_or_default()
    }

    /// Selected option value of a choice field.
    pub fn choice(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }

    pub fn is(&self, name: &str, option: &str) -> bool {
        self.choice(name) == option
    }

    pub fn yes(&self, name: &str) -> bool {
        self.is(name, "yes")
    }
}
