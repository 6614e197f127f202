//! Errors raised at the parameter validation boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("unknown growth model '{0}' (expected 'exponential' or 'logistic')")]
    InvalidModel(String),
    #[error("logistic model requires a carrying capacity greater than zero, got {0}")]
    DegenerateCapacity(f64),
    #[error("invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("no preset named '{0}'")]
    UnknownPreset(String),
}
