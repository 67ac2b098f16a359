//! Unit conversion module
//!
//! Height arrives as feet plus an inch remainder, the way the intake form
//! collects it. Every formula needs it in a different unit (meters for BMI,
//! inches for IBW, centimeters for BMR), so the derived values are computed
//! on demand from the two stored integers and never cached.
//!
//! # Design Principles
//!
//! 1. **Single Source**: Only feet and inches are stored
//! 2. **Type Safety**: Height is a type, not a loose pair of integers
//! 3. **Fixed Factors**: Conversion factors match the clinical worksheet exactly

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Conversion Factors
// ============================================================================

/// Inches per foot
pub const INCHES_PER_FOOT: u32 = 12;

/// Meters per inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram, rounded the way the IBW worksheet rounds it
pub const LBS_PER_KG: f64 = 2.2;

/// Five feet, the IBW reference height
pub const IBW_REFERENCE_INCHES: u32 = 60;

// ============================================================================
// Feet/Inches Height
// ============================================================================

/// Height as entered: whole feet plus a 0-11 inch remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightSpec {
    pub feet: u32,
    pub inches: u32,
}

impl HeightSpec {
    pub fn new(feet: u32, inches: u32) -> Self {
        Self { feet, inches }
    }

    /// Total height in inches
    pub fn total_inches(&self) -> u32 {
        self.feet * INCHES_PER_FOOT + self.inches
    }

    /// Height in meters
    pub fn meters(&self) -> f64 {
        f64::from(self.total_inches()) * METERS_PER_INCH
    }

    /// Height in centimeters
    pub fn centimeters(&self) -> f64 {
        f64::from(self.total_inches()) * CM_PER_INCH
    }

    /// Whether the height is under the five-foot IBW reference
    pub fn is_under_five_feet(&self) -> bool {
        self.total_inches() < IBW_REFERENCE_INCHES
    }
}

impl fmt::Display for HeightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

/// Convert pounds to kilograms using the worksheet factor
pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_height_conversions() {
        let height = HeightSpec::new(5, 7);
        assert_eq!(height.total_inches(), 67);
        assert!((height.meters() - 1.7018).abs() < 1e-9);
        assert!((height.centimeters() - 170.18).abs() < 1e-9);
    }

    #[test]
    fn test_five_feet_threshold() {
        assert!(HeightSpec::new(4, 11).is_under_five_feet());
        assert!(!HeightSpec::new(5, 0).is_under_five_feet());
        assert!(!HeightSpec::new(6, 2).is_under_five_feet());
    }

    #[test]
    fn test_display() {
        assert_eq!(HeightSpec::new(5, 7).to_string(), "5'7\"");
    }

    #[test]
    fn test_lbs_to_kg() {
        assert!((lbs_to_kg(106.0) - 48.1818).abs() < 0.001);
        assert!((lbs_to_kg(220.0) - 100.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: meters and centimeters describe the same length
        #[test]
        fn prop_meters_and_cm_agree(feet in 1u32..=8, inches in 0u32..=11) {
            let height = HeightSpec::new(feet, inches);
            prop_assert!((height.meters() * 100.0 - height.centimeters()).abs() < 1e-9);
        }

        /// Property: the under-five-feet test matches the feet value
        #[test]
        fn prop_threshold_matches_feet(feet in 1u32..=8, inches in 0u32..=11) {
            let height = HeightSpec::new(feet, inches);
            prop_assert_eq!(height.is_under_five_feet(), feet < 5);
        }
    }
}
