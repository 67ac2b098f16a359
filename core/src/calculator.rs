//! Validate, compute and present in one call
//!
//! Each call is an independent, stateless computation. A validation failure
//! short-circuits the pipeline before any formula runs.

use crate::config::CalculatorConfig;
use crate::errors::ValidationError;
use crate::health_metrics::calculate_results;
use crate::presenter::{present, DisplayText, PresentConfig};
use crate::types::{RawInputs, ResultsRecord};
use crate::validation::validate;
use tracing::{debug, instrument};

/// Validate raw inputs and compute every metric
#[instrument(
    level = "debug",
    skip_all,
    fields(
        variant = %config.variant,
        bmr_weight_source = ?config.bmr_weight_source,
        apply_stress_factor = config.apply_stress_factor
    )
)]
pub fn compute(
    raw: &RawInputs,
    config: &CalculatorConfig,
) -> Result<ResultsRecord, ValidationError> {
    let inputs = validate(raw, config).map_err(|err| {
        debug!(kind = err.kind(), error = %err, "Rejected nutrition inputs");
        err
    })?;

    let results = calculate_results(&inputs, config);
    debug!(
        bmi = results.bmi,
        ibw = results.ibw,
        bmr = results.bmr,
        tee = results.tee,
        "Computed nutrition metrics"
    );

    Ok(results)
}

/// Validate, compute and format for display
///
/// `present_config` is separate from `config` so a caller can override
/// the variant's default precision.
pub fn compute_and_present(
    raw: &RawInputs,
    config: &CalculatorConfig,
    present_config: &PresentConfig,
) -> Result<DisplayText, ValidationError> {
    let results = compute(raw, config)?;
    Ok(present(&results, present_config))
}
