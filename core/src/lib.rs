//! Nutrition Assessment Core Library
//!
//! Validates anthropometric inputs and computes BMI, ideal body weight,
//! basal metabolic rate, total energy expenditure and the macronutrient
//! distribution, for both the baseline and the stress-factor calculators.
//!
//! The two pipeline entry points are [`validate`] and
//! [`compute_and_present`].

pub mod calculator;
pub mod config;
pub mod errors;
pub mod health_metrics;
pub mod presenter;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculator::{compute, compute_and_present};
pub use errors::*;
pub use health_metrics::*;
pub use presenter::{present, DisplayLine, DisplayText, DisplayUnit, Precision, PresentConfig};
pub use types::*;
pub use units::*;
pub use validation::validate;

pub use crate::config::{BmrWeightSource, CalculatorConfig, Variant};
