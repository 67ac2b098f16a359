//! Error types for the nutrition calculator

use crate::types::{Bounds, Field};
use std::fmt;
use thiserror::Error;

/// A field whose value fell outside its accepted range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub field: Field,
    pub value: f64,
    pub bounds: Bounds,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be between {} and {} (got {})",
            self.field, self.bounds.min, self.bounds.max, self.value
        )
    }
}

/// Rejection of a set of raw inputs
///
/// Every variant is a user-input error; none indicates an internal fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill out all fields. Missing or invalid: {}", join_labels(.fields))]
    MissingOrUnparseable { fields: Vec<Field> },

    #[error(
        "Please ensure all input values are within the specified ranges. {}",
        join_violations(.violations)
    )]
    OutOfRange { violations: Vec<RangeViolation> },

    #[error("The sum of carbs, protein, and fat must be exactly 100 (got {sum}).")]
    MacroSumInvalid { sum: f64 },
}

impl ValidationError {
    /// Stable machine-readable error code
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingOrUnparseable { .. } => "MISSING_OR_UNPARSEABLE",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::MacroSumInvalid { .. } => "MACRO_SUM_INVALID",
        }
    }

    /// Fields implicated by the rejection
    pub fn fields(&self) -> Vec<Field> {
        match self {
            ValidationError::MissingOrUnparseable { fields } => fields.clone(),
            ValidationError::OutOfRange { violations } => {
                violations.iter().map(|v| v.field).collect()
            }
            ValidationError::MacroSumInvalid { .. } => {
                vec![Field::CarbsPct, Field::ProteinPct, Field::FatPct]
            }
        }
    }
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::display_label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_violations(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
