//! Calculator configuration
//!
//! The baseline and stress-factor calculators differ only in a handful of
//! settings, so both are expressed as presets of one `CalculatorConfig`.
//!
//! Configuration is loaded hierarchically:
//! 1. The variant preset (in code)
//! 2. An optional TOML file
//! 3. Environment variables (prefix: NUTRITION__)

use crate::errors::ConfigError;
use crate::presenter::{Precision, PresentConfig};
use crate::types::Bounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "NUTRITION";

/// Activity factor range accepted by the baseline calculator
pub const BASELINE_ACTIVITY_BOUNDS: Bounds = Bounds::new(1.0, 1.12);

/// Activity factor range accepted by the stress-factor calculator
pub const STRESS_ACTIVITY_BOUNDS: Bounds = Bounds::new(1.0, 2.0);

/// Calculator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Measured weight in BMR, two-decimal display
    #[default]
    Baseline,
    /// IBW in BMR, optional stress multiplier, whole-number display
    StressFactor,
}

impl Variant {
    /// Build the preset configuration for this variant
    pub fn config(self) -> CalculatorConfig {
        match self {
            Variant::Baseline => CalculatorConfig {
                variant: Variant::Baseline,
                activity_factor_bounds: BASELINE_ACTIVITY_BOUNDS,
                bmr_weight_source: BmrWeightSource::Actual,
                apply_stress_factor: false,
                stress_factor_bounds: None,
                macro_sum_tolerance: None,
                present: PresentConfig {
                    precision: Precision::TwoDecimal,
                },
            },
            Variant::StressFactor => CalculatorConfig {
                variant: Variant::StressFactor,
                activity_factor_bounds: STRESS_ACTIVITY_BOUNDS,
                bmr_weight_source: BmrWeightSource::Ideal,
                apply_stress_factor: true,
                stress_factor_bounds: None,
                macro_sum_tolerance: None,
                present: PresentConfig {
                    precision: Precision::NearestInteger,
                },
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::StressFactor => "stress-factor",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" | "a" => Ok(Variant::Baseline),
            "stress" | "stress-factor" | "stress_factor" | "b" => Ok(Variant::StressFactor),
            _ => Err(format!("Unknown calculator variant: {}", s)),
        }
    }
}

impl From<Variant> for CalculatorConfig {
    fn from(variant: Variant) -> Self {
        variant.config()
    }
}

/// Which weight feeds the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrWeightSource {
    /// The weight the user entered
    Actual,
    /// The computed ideal body weight
    Ideal,
}

/// Everything that distinguishes one calculator variant from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Preset these settings started from
    pub variant: Variant,
    /// Accepted activity factor range
    pub activity_factor_bounds: Bounds,
    /// Weight used by the BMR equation
    pub bmr_weight_source: BmrWeightSource,
    /// Read the stress factor and multiply it into TEE
    pub apply_stress_factor: bool,
    /// Optional range for the stress factor; unbounded when absent
    #[serde(default)]
    pub stress_factor_bounds: Option<Bounds>,
    /// Allowed distance of the macro sum from 100; exact match when absent
    #[serde(default)]
    pub macro_sum_tolerance: Option<f64>,
    /// Default presentation settings
    pub present: PresentConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Variant::default().config()
    }
}

impl CalculatorConfig {
    pub fn baseline() -> Self {
        Variant::Baseline.config()
    }

    pub fn stress_factor() -> Self {
        Variant::StressFactor.config()
    }

    /// Load configuration from the variant preset, an optional file and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Variant preset
    /// 2. Config file at `path`, if given (format from its extension)
    /// 3. Environment variables with NUTRITION__ prefix
    pub fn load(variant: Variant, path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&variant.config())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // e.g., NUTRITION__MACRO_SUM_TOLERANCE=0.01 sets macro_sum_tolerance
        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.check()?;
        Ok(loaded)
    }

    /// Layer an in-memory TOML document over the variant preset
    pub fn from_toml_str(variant: Variant, toml: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&variant.config())?)
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.check()?;
        Ok(loaded)
    }

    /// Reject bounds and tolerances that cannot be applied
    pub fn check(&self) -> Result<(), ConfigError> {
        if !self.activity_factor_bounds.is_well_formed() {
            return Err(ConfigError::Invalid(format!(
                "activity_factor_bounds {} must be finite with min <= max",
                self.activity_factor_bounds
            )));
        }
        if let Some(bounds) = self.stress_factor_bounds {
            if !bounds.is_well_formed() {
                return Err(ConfigError::Invalid(format!(
                    "stress_factor_bounds {} must be finite with min <= max",
                    bounds
                )));
            }
        }
        if let Some(tolerance) = self.macro_sum_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "macro_sum_tolerance must be a non-negative number (got {})",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}
