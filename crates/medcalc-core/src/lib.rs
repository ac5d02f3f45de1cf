//! medcalc-core
//!
//! Schema vocabulary shared by every calculator: field specs, input
//! validation, classification bands, scoring helpers and score results.
//! Pure data, no I/O.

pub mod bands;
pub mod error;
pub mod field;
pub mod result;
pub mod scoring;
pub mod validate;
