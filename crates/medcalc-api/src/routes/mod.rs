pub mod calculators;
pub mod health;
