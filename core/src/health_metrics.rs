//! Health metrics calculations module
//!
//! Provides the five nutrition-assessment metrics: BMI, Ideal Body Weight,
//! Basal Metabolic Rate, Total Energy Expenditure and the Acceptable
//! Macronutrient Distribution Range.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total**: Every formula is defined over the validated input domain
//! 3. **Configurable**: The BMR weight source and stress factor come from
//!    `CalculatorConfig`, not from separate code paths
//! 4. **Type Safety**: Height is a `HeightSpec`, never a loose number

use crate::config::{BmrWeightSource, CalculatorConfig};
use crate::types::{Amdr, MacroSplit, ResultsRecord, ValidatedInputs};
use crate::units::{lbs_to_kg, HeightSpec, IBW_REFERENCE_INCHES};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Gender
// ============================================================================

/// Gender used by the IBW and BMR equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// IBW at exactly five feet, in pounds
    pub fn ibw_base_lbs(&self) -> f64 {
        match self {
            Gender::Male => 106.0,
            Gender::Female => 100.0,
        }
    }

    /// IBW pounds added (or removed) per inch from five feet
    pub fn ibw_lbs_per_inch(&self) -> f64 {
        match self {
            Gender::Male => 6.0,
            Gender::Female => 5.0,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

// ============================================================================
// BMI
// ============================================================================

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height: HeightSpec) -> f64 {
    let height_m = height.meters();
    weight_kg / height_m.powi(2)
}

// ============================================================================
// Ideal Body Weight
// ============================================================================

/// Calculate ideal body weight in kilograms
///
/// Starts from 106 lb (male) or 100 lb (female) at five feet and moves
/// 6 lb or 5 lb per inch above or below that height.
pub fn calculate_ibw(height: HeightSpec, gender: Gender) -> f64 {
    let total_inches = height.total_inches();
    let base = gender.ibw_base_lbs();
    let per_inch = gender.ibw_lbs_per_inch();

    let pounds = if height.is_under_five_feet() {
        let deficit_inches = f64::from(IBW_REFERENCE_INCHES - total_inches);
        base - per_inch * deficit_inches
    } else {
        let excess_inches = f64::from(total_inches - IBW_REFERENCE_INCHES);
        base + excess_inches * per_inch
    };

    lbs_to_kg(pounds)
}

// ============================================================================
// BMR and TEE
// ============================================================================

/// Calculate Basal Metabolic Rate (Harris-Benedict coefficients)
///
/// Men: BMR = 66.5 + 13.75 × weight(kg) + 5.003 × height(cm) - 6.75 × age(y)
/// Women: BMR = 655.1 + 9.563 × weight(kg) + 1.850 × height(cm) - 4.676 × age(y)
pub fn calculate_bmr(weight_kg: f64, height: HeightSpec, age_years: u32, gender: Gender) -> f64 {
    let height_cm = height.centimeters();
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 66.5 + 13.75 * weight_kg + 5.003 * height_cm - 6.75 * age,
        Gender::Female => 655.1 + 9.563 * weight_kg + 1.850 * height_cm - 4.676 * age,
    }
}

/// Calculate Total Energy Expenditure
///
/// TEE = BMR × activity factor, times the stress factor when one is given
pub fn calculate_tee(bmr: f64, activity_factor: f64, stress_factor: Option<f64>) -> f64 {
    let tee = bmr * activity_factor;
    match stress_factor {
        Some(stress) => tee * stress,
        None => tee,
    }
}

// ============================================================================
// AMDR
// ============================================================================

/// kcal per gram of carbohydrate
pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
/// kcal per gram of protein
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Split total energy into grams per day of each macronutrient
pub fn calculate_amdr(tee: f64, macros: &MacroSplit) -> Amdr {
    Amdr {
        carbohydrates: (macros.carbs_pct / 100.0 * tee) / KCAL_PER_GRAM_CARBOHYDRATE,
        protein: (macros.protein_pct / 100.0 * tee) / KCAL_PER_GRAM_PROTEIN,
        fat: (macros.fat_pct / 100.0 * tee) / KCAL_PER_GRAM_FAT,
    }
}

impl Amdr {
    /// Energy represented by the gram amounts, in kcal
    pub fn total_kcal(&self) -> f64 {
        self.carbohydrates * KCAL_PER_GRAM_CARBOHYDRATE
            + self.protein * KCAL_PER_GRAM_PROTEIN
            + self.fat * KCAL_PER_GRAM_FAT
    }
}

// ============================================================================
// Full Computation
// ============================================================================

/// Run every formula in dependency order
///
/// BMI and IBW come first; BMR takes either the measured weight or the IBW
/// depending on the configuration; TEE scales BMR; AMDR splits TEE.
pub fn calculate_results(inputs: &ValidatedInputs, config: &CalculatorConfig) -> ResultsRecord {
    let bmi = calculate_bmi(inputs.weight_kg, inputs.height);
    let ibw = calculate_ibw(inputs.height, inputs.gender);

    let bmr_weight = match config.bmr_weight_source {
        BmrWeightSource::Actual => inputs.weight_kg,
        BmrWeightSource::Ideal => ibw,
    };
    let bmr = calculate_bmr(bmr_weight, inputs.height, inputs.age_years, inputs.gender);

    let stress_factor = if config.apply_stress_factor {
        inputs.stress_factor
    } else {
        None
    };
    let tee = calculate_tee(bmr, inputs.activity_factor, stress_factor);
    let amdr = calculate_amdr(tee, &inputs.macros);

    ResultsRecord {
        bmi,
        ibw,
        bmr,
        tee,
        amdr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use proptest::prelude::*;

    fn inputs(weight_kg: f64, stress_factor: Option<f64>) -> ValidatedInputs {
        ValidatedInputs {
            age_years: 40,
            gender: Gender::Female,
            weight_kg,
            height: HeightSpec::new(5, 4),
            activity_factor: 1.1,
            stress_factor,
            macros: MacroSplit {
                carbs_pct: 50.0,
                protein_pct: 20.0,
                fat_pct: 30.0,
            },
        }
    }

    // =========================================================================
    // Gender Tests
    // =========================================================================

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" Female ".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.to_string(), "female");
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 5'7" -> 1.7018 m -> BMI ~24.17
        let bmi = calculate_bmi(70.0, HeightSpec::new(5, 7));
        assert!((bmi - 24.17).abs() < 0.01);
    }

    #[test]
    fn test_bmi_zero_weight() {
        assert_eq!(calculate_bmi(0.0, HeightSpec::new(5, 0)), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 0.0f64..150.0,
            weight2 in 150.1f64..300.0,
            feet in 1u32..=8,
            inches in 0u32..=11
        ) {
            let height = HeightSpec::new(feet, inches);
            prop_assert!(calculate_bmi(weight2, height) > calculate_bmi(weight1, height));
        }

        /// Property: Taller height = lower BMI (same weight)
        #[test]
        fn prop_bmi_decreases_with_height(
            weight in 1.0f64..300.0,
            feet in 1u32..=7,
            inches in 0u32..=11
        ) {
            let shorter = HeightSpec::new(feet, inches);
            let taller = HeightSpec::new(feet + 1, inches);
            prop_assert!(calculate_bmi(weight, shorter) > calculate_bmi(weight, taller));
        }
    }

    // =========================================================================
    // IBW Tests
    // =========================================================================

    #[test]
    fn test_ibw_male_at_five_feet() {
        let ibw = calculate_ibw(HeightSpec::new(5, 0), Gender::Male);
        assert!((ibw - 48.18).abs() < 0.01);
    }

    #[test]
    fn test_ibw_female_under_five_feet() {
        // 4'10" -> 2 inches short -> (100 - 10) / 2.2
        let ibw = calculate_ibw(HeightSpec::new(4, 10), Gender::Female);
        assert!((ibw - 40.91).abs() < 0.01);
    }

    #[test]
    fn test_ibw_above_five_feet() {
        // Male 6'0" -> 12 inches over -> (106 + 72) / 2.2
        let ibw = calculate_ibw(HeightSpec::new(6, 0), Gender::Male);
        assert!((ibw - 178.0 / 2.2).abs() < 1e-9);

        // Female 5'4" -> 4 inches over -> (100 + 20) / 2.2
        let ibw = calculate_ibw(HeightSpec::new(5, 4), Gender::Female);
        assert!((ibw - 120.0 / 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_ibw_can_go_negative_for_very_short_heights() {
        // 1'0" male: 48 inches short -> 106 - 288 lb
        let ibw = calculate_ibw(HeightSpec::new(1, 0), Gender::Male);
        assert!(ibw < 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Both branches agree with the linear form around five feet
        #[test]
        fn prop_ibw_is_linear_in_height(feet in 1u32..=8, inches in 0u32..=11) {
            let height = HeightSpec::new(feet, inches);
            let offset = f64::from(height.total_inches()) - 60.0;
            let expected = (106.0 + 6.0 * offset) / 2.2;
            prop_assert!((calculate_ibw(height, Gender::Male) - expected).abs() < 1e-9);
        }

        /// Property: Male IBW exceeds female IBW at or above five feet
        #[test]
        fn prop_male_ibw_higher_above_five_feet(feet in 5u32..=8, inches in 0u32..=11) {
            let height = HeightSpec::new(feet, inches);
            prop_assert!(
                calculate_ibw(height, Gender::Male) > calculate_ibw(height, Gender::Female)
            );
        }
    }

    // =========================================================================
    // BMR/TEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_male() {
        // 30yo male, 80kg, 5'11" (180.34 cm)
        let bmr = calculate_bmr(80.0, HeightSpec::new(5, 11), 30, Gender::Male);
        let expected = 66.5 + 13.75 * 80.0 + 5.003 * 180.34 - 6.75 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);
        assert!((bmr - 1866.24).abs() < 0.01);
    }

    #[test]
    fn test_bmr_female() {
        // 30yo female, 60kg, 5'5" (165.1 cm)
        let bmr = calculate_bmr(60.0, HeightSpec::new(5, 5), 30, Gender::Female);
        let expected = 655.1 + 9.563 * 60.0 + 1.850 * 165.1 - 4.676 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tee_with_and_without_stress() {
        assert!((calculate_tee(1500.0, 1.1, None) - 1650.0).abs() < 1e-9);
        assert!((calculate_tee(1500.0, 1.1, Some(1.5)) - 2475.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Male BMR > Female BMR for adult stats
        #[test]
        fn prop_male_bmr_higher(
            weight in 60.0f64..100.0,
            inches in 0u32..=11,
            age in 20u32..50
        ) {
            let height = HeightSpec::new(5, inches);
            let male = calculate_bmr(weight, height, age, Gender::Male);
            let female = calculate_bmr(weight, height, age, Gender::Female);
            prop_assert!(male > female);
        }

        /// Property: TEE >= BMR for any activity factor of at least 1
        #[test]
        fn prop_tee_not_below_bmr(bmr in 500.0f64..3000.0, activity in 1.0f64..=2.0) {
            prop_assert!(calculate_tee(bmr, activity, None) >= bmr);
        }
    }

    // =========================================================================
    // AMDR Tests
    // =========================================================================

    #[test]
    fn test_amdr_split() {
        let macros = MacroSplit {
            carbs_pct: 50.0,
            protein_pct: 20.0,
            fat_pct: 30.0,
        };
        let amdr = calculate_amdr(2000.0, &macros);
        assert!((amdr.carbohydrates - 250.0).abs() < 1e-9);
        assert!((amdr.protein - 100.0).abs() < 1e-9);
        assert!((amdr.fat - 66.67).abs() < 0.01);
        assert!((amdr.total_kcal() - 2000.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Gram amounts convert back to the full energy budget
        #[test]
        fn prop_amdr_conserves_energy(
            tee in 500.0f64..6000.0,
            carbs in 45.0f64..=65.0,
            protein in 10.0f64..=35.0
        ) {
            let macros = MacroSplit {
                carbs_pct: carbs,
                protein_pct: protein,
                fat_pct: 100.0 - carbs - protein,
            };
            let amdr = calculate_amdr(tee, &macros);
            prop_assert!((amdr.total_kcal() - tee).abs() < 1e-6);
        }
    }

    // =========================================================================
    // Full Computation Tests
    // =========================================================================

    #[test]
    fn test_baseline_uses_actual_weight() {
        let config = Variant::Baseline.config();
        let light = calculate_results(&inputs(55.0, None), &config);
        let heavy = calculate_results(&inputs(95.0, None), &config);
        assert!(heavy.bmr > light.bmr);
        assert!((light.ibw - heavy.ibw).abs() < 1e-12);
    }

    #[test]
    fn test_baseline_ignores_stress_factor() {
        let config = Variant::Baseline.config();
        let results = calculate_results(&inputs(60.0, Some(1.5)), &config);
        assert!((results.tee - results.bmr * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_stress_variant_applies_stress_factor() {
        let config = Variant::StressFactor.config();
        let without = calculate_results(&inputs(60.0, None), &config);
        let with = calculate_results(&inputs(60.0, Some(1.5)), &config);
        assert!((without.tee - without.bmr * 1.1).abs() < 1e-9);
        assert!((with.tee - without.tee * 1.5).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: With IBW as the BMR weight, measured weight has no effect on BMR
        #[test]
        fn prop_stress_variant_bmr_ignores_weight(w1 in 0.0f64..=300.0, w2 in 0.0f64..=300.0) {
            let config = Variant::StressFactor.config();
            let a = calculate_results(&inputs(w1, None), &config);
            let b = calculate_results(&inputs(w2, None), &config);
            prop_assert_eq!(a.bmr, b.bmr);
            prop_assert_eq!(a.tee, b.tee);
        }
    }
}
