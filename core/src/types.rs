//! Input and result records for the calculator
//!
//! `RawInputs` is what the intake form hands over: one optional text value
//! per field. `ValidatedInputs` is the typed record the formulas consume and
//! `ResultsRecord` is what they produce.

use crate::health_metrics::Gender;
use crate::units::HeightSpec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Field Names
// ============================================================================

/// Every input field the calculator reads, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    Gender,
    Weight,
    HeightFeet,
    HeightInches,
    ActivityFactor,
    StressFactor,
    CarbsPct,
    ProteinPct,
    FatPct,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 10] = [
        Field::Age,
        Field::Gender,
        Field::Weight,
        Field::HeightFeet,
        Field::HeightInches,
        Field::ActivityFactor,
        Field::StressFactor,
        Field::CarbsPct,
        Field::ProteinPct,
        Field::FatPct,
    ];

    /// Name used on the input boundary (form ids, JSON keys)
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Weight => "weight",
            Field::HeightFeet => "heightFeet",
            Field::HeightInches => "heightInches",
            Field::ActivityFactor => "activityFactor",
            Field::StressFactor => "stressFactor",
            Field::CarbsPct => "carbsPct",
            Field::ProteinPct => "proteinPct",
            Field::FatPct => "fatPct",
        }
    }

    /// User-friendly label for error messages
    pub fn display_label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Weight => "Weight (kg)",
            Field::HeightFeet => "Height (feet)",
            Field::HeightInches => "Height (inches)",
            Field::ActivityFactor => "Activity Factor",
            Field::StressFactor => "Stress Factor",
            Field::CarbsPct => "Carbohydrates (%)",
            Field::ProteinPct => "Protein (%)",
            Field::FatPct => "Fat (%)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown input field: {}", s))
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the range, both ends included
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both ends finite and ordered
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ============================================================================
// Raw Inputs
// ============================================================================

/// Unvalidated form values, one optional text value per field
///
/// Deserializes from a JSON object keyed by wire name. Numbers are accepted
/// as well as strings so a client may send either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub height_feet: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub height_inches: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub activity_factor: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stress_factor: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub carbs_pct: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub protein_pct: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fat_pct: Option<String>,
}

impl RawInputs {
    /// Build from `(wire name, value)` pairs, ignoring unknown names
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            if let Ok(field) = key.as_ref().parse::<Field>() {
                raw.set(field, value);
            }
        }
        raw
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Builder-style removal
    pub fn without(mut self, field: Field) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Weight => &self.weight,
            Field::HeightFeet => &self.height_feet,
            Field::HeightInches => &self.height_inches,
            Field::ActivityFactor => &self.activity_factor,
            Field::StressFactor => &self.stress_factor,
            Field::CarbsPct => &self.carbs_pct,
            Field::ProteinPct => &self.protein_pct,
            Field::FatPct => &self.fat_pct,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Weight => &mut self.weight,
            Field::HeightFeet => &mut self.height_feet,
            Field::HeightInches => &mut self.height_inches,
            Field::ActivityFactor => &mut self.activity_factor,
            Field::StressFactor => &mut self.stress_factor,
            Field::CarbsPct => &mut self.carbs_pct,
            Field::ProteinPct => &mut self.protein_pct,
            Field::FatPct => &mut self.fat_pct,
        }
    }
}

/// Accept a JSON string, number or null as optional text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Validated Inputs
// ============================================================================

/// Macronutrient energy split, in percent of total energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub carbs_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

impl MacroSplit {
    /// Sum of the three percentages, added in form order
    pub fn total_pct(&self) -> f64 {
        self.carbs_pct + self.protein_pct + self.fat_pct
    }
}

/// Inputs that passed every validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedInputs {
    pub age_years: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height: HeightSpec,
    pub activity_factor: f64,
    /// Only ever set when the active configuration applies a stress factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_factor: Option<f64>,
    pub macros: MacroSplit,
}

// ============================================================================
// Results
// ============================================================================

/// Grams per day of each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amdr {
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Output of one computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRecord {
    /// kg/m²
    pub bmi: f64,
    /// kg
    pub ibw: f64,
    /// kcal/day
    pub bmr: f64,
    /// kcal/day
    pub tee: f64,
    pub amdr: Amdr,
}
