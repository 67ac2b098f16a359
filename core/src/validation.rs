//! Input validation
//!
//! Raw form values pass three rules in order; the first failing rule decides
//! the error kind, and within a rule every offending field is reported.
//!
//! 1. Presence/parse: every required field is present and numeric, gender is
//!    recognised
//! 2. Range: every value lies in its inclusive clinical range
//! 3. Composition: the macronutrient percentages add up to 100

use crate::config::CalculatorConfig;
use crate::errors::{RangeViolation, ValidationError};
use crate::health_metrics::Gender;
use crate::types::{Bounds, Field, MacroSplit, RawInputs, ValidatedInputs};
use crate::units::HeightSpec;

// ============================================================================
// Clinical Ranges
// ============================================================================

/// Age in years
pub const AGE_BOUNDS: Bounds = Bounds::new(1.0, 150.0);
/// Weight in kilograms
pub const WEIGHT_BOUNDS: Bounds = Bounds::new(0.0, 300.0);
/// Whole feet of height
pub const HEIGHT_FEET_BOUNDS: Bounds = Bounds::new(1.0, 8.0);
/// Inch remainder of height
pub const HEIGHT_INCHES_BOUNDS: Bounds = Bounds::new(0.0, 11.0);
/// Carbohydrate share of energy, percent
pub const CARBS_PCT_BOUNDS: Bounds = Bounds::new(45.0, 65.0);
/// Protein share of energy, percent
pub const PROTEIN_PCT_BOUNDS: Bounds = Bounds::new(10.0, 35.0);
/// Fat share of energy, percent
pub const FAT_PCT_BOUNDS: Bounds = Bounds::new(20.0, 35.0);

/// Required sum of the macronutrient percentages
pub const MACRO_TOTAL_PCT: f64 = 100.0;

// ============================================================================
// Parsing
// ============================================================================

/// Parse a decimal field; blank, non-numeric and non-finite text is rejected
pub fn parse_decimal(text: Option<&str>) -> Option<f64> {
    let value: f64 = text?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a whole-number field
///
/// Integral decimals such as "5.0" are accepted; "5.5" is not.
pub fn parse_whole(text: Option<&str>) -> Option<i64> {
    let trimmed = text?.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = parse_decimal(Some(trimmed))?;
    (value.fract() == 0.0).then_some(value as i64)
}

/// Parse the gender field
pub fn parse_gender(text: Option<&str>) -> Option<Gender> {
    text?.parse().ok()
}

/// Values after the presence/parse rule, before range checking
#[derive(Debug, Clone, PartialEq)]
struct ParsedInputs {
    age: i64,
    gender: Gender,
    weight: f64,
    height_feet: i64,
    height_inches: i64,
    activity_factor: f64,
    stress_factor: Option<f64>,
    macros: MacroSplit,
}

fn require<T>(value: Option<T>, field: Field, missing: &mut Vec<Field>) -> Option<T> {
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn parse_inputs(
    raw: &RawInputs,
    config: &CalculatorConfig,
) -> Result<ParsedInputs, ValidationError> {
    let mut missing = Vec::new();

    let age = require(parse_whole(raw.get(Field::Age)), Field::Age, &mut missing);
    let gender = require(parse_gender(raw.get(Field::Gender)), Field::Gender, &mut missing);
    let weight = require(parse_decimal(raw.get(Field::Weight)), Field::Weight, &mut missing);
    let height_feet = require(
        parse_whole(raw.get(Field::HeightFeet)),
        Field::HeightFeet,
        &mut missing,
    );
    let height_inches = require(
        parse_whole(raw.get(Field::HeightInches)),
        Field::HeightInches,
        &mut missing,
    );
    let activity_factor = require(
        parse_decimal(raw.get(Field::ActivityFactor)),
        Field::ActivityFactor,
        &mut missing,
    );
    let carbs_pct = require(parse_decimal(raw.get(Field::CarbsPct)), Field::CarbsPct, &mut missing);
    let protein_pct = require(
        parse_decimal(raw.get(Field::ProteinPct)),
        Field::ProteinPct,
        &mut missing,
    );
    let fat_pct = require(parse_decimal(raw.get(Field::FatPct)), Field::FatPct, &mut missing);

    // Optional: an unreadable stress factor counts as not provided
    let stress_factor = if config.apply_stress_factor {
        parse_decimal(raw.get(Field::StressFactor))
    } else {
        None
    };

    match (
        age,
        gender,
        weight,
        height_feet,
        height_inches,
        activity_factor,
        carbs_pct,
        protein_pct,
        fat_pct,
    ) {
        (
            Some(age),
            Some(gender),
            Some(weight),
            Some(height_feet),
            Some(height_inches),
            Some(activity_factor),
            Some(carbs_pct),
            Some(protein_pct),
            Some(fat_pct),
        ) => Ok(ParsedInputs {
            age,
            gender,
            weight,
            height_feet,
            height_inches,
            activity_factor,
            stress_factor,
            macros: MacroSplit {
                carbs_pct,
                protein_pct,
                fat_pct,
            },
        }),
        _ => Err(ValidationError::MissingOrUnparseable { fields: missing }),
    }
}

// ============================================================================
// Range and Composition Rules
// ============================================================================

fn check_ranges(parsed: &ParsedInputs, config: &CalculatorConfig) -> Result<(), ValidationError> {
    let mut checks = vec![
        (Field::Age, parsed.age as f64, AGE_BOUNDS),
        (Field::Weight, parsed.weight, WEIGHT_BOUNDS),
        (Field::HeightFeet, parsed.height_feet as f64, HEIGHT_FEET_BOUNDS),
        (Field::HeightInches, parsed.height_inches as f64, HEIGHT_INCHES_BOUNDS),
        (
            Field::ActivityFactor,
            parsed.activity_factor,
            config.activity_factor_bounds,
        ),
    ];
    if let (Some(stress), Some(bounds)) = (parsed.stress_factor, config.stress_factor_bounds) {
        checks.push((Field::StressFactor, stress, bounds));
    }
    checks.extend([
        (Field::CarbsPct, parsed.macros.carbs_pct, CARBS_PCT_BOUNDS),
        (Field::ProteinPct, parsed.macros.protein_pct, PROTEIN_PCT_BOUNDS),
        (Field::FatPct, parsed.macros.fat_pct, FAT_PCT_BOUNDS),
    ]);

    let violations: Vec<RangeViolation> = checks
        .into_iter()
        .filter(|(_, value, bounds)| !bounds.contains(*value))
        .map(|(field, value, bounds)| RangeViolation {
            field,
            value,
            bounds,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { violations })
    }
}

/// Check the macronutrient percentages add up to 100
///
/// With no tolerance the sum must be exactly 100.0 in floating point, so
/// some decimal splits (45.7 + 24.1 + 30.2) are rejected unless a tolerance
/// is set.
pub fn check_macro_sum(macros: &MacroSplit, tolerance: Option<f64>) -> Result<(), ValidationError> {
    let sum = macros.total_pct();
    let accepted = match tolerance {
        Some(tolerance) => (sum - MACRO_TOTAL_PCT).abs() <= tolerance,
        None => sum == MACRO_TOTAL_PCT,
    };
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::MacroSumInvalid { sum })
    }
}

/// Validate raw inputs against the rules of the given configuration
pub fn validate(
    raw: &RawInputs,
    config: &CalculatorConfig,
) -> Result<ValidatedInputs, ValidationError> {
    let parsed = parse_inputs(raw, config)?;
    check_ranges(&parsed, config)?;
    check_macro_sum(&parsed.macros, config.macro_sum_tolerance)?;

    // Whole-number fields are within their (non-negative) ranges by now
    Ok(ValidatedInputs {
        age_years: parsed.age as u32,
        gender: parsed.gender,
        weight_kg: parsed.weight,
        height: HeightSpec::new(parsed.height_feet as u32, parsed.height_inches as u32),
        activity_factor: parsed.activity_factor,
        stress_factor: parsed.stress_factor,
        macros: parsed.macros,
    })
}
