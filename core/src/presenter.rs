//! Result presentation
//!
//! Turns a `ResultsRecord` into labelled, formatted lines. Rounding is a
//! presentation choice only; the record itself is never modified.

use crate::types::ResultsRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric rendering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Precision {
    /// Two digits after the decimal point
    #[default]
    #[serde(rename = "2-decimal")]
    TwoDecimal,
    /// Rounded to the nearest whole unit
    #[serde(rename = "nearest-integer")]
    NearestInteger,
}

impl Precision {
    /// Format a value under this policy
    pub fn format(&self, value: f64) -> String {
        match self {
            // Round half away from zero first; `{:.2}` alone breaks ties to even
            Precision::TwoDecimal => format!("{:.2}", (value * 100.0).round() / 100.0 + 0.0),
            // Adding 0.0 turns a rounded -0 into 0
            Precision::NearestInteger => format!("{:.0}", value.round() + 0.0),
        }
    }
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2-decimal" | "two-decimal" => Ok(Precision::TwoDecimal),
            "nearest-integer" | "integer" => Ok(Precision::NearestInteger),
            _ => Err(format!("Unknown precision: {}", s)),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PresentConfig {
    pub precision: Precision,
}

impl From<Precision> for PresentConfig {
    fn from(precision: Precision) -> Self {
        Self { precision }
    }
}

/// Unit suffix for a displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnit {
    KgPerSquareMeter,
    Kg,
    Kcal,
    Grams,
}

impl DisplayUnit {
    pub fn text(&self) -> &'static str {
        match self {
            DisplayUnit::KgPerSquareMeter => "kg/m²",
            DisplayUnit::Kg => "kg",
            DisplayUnit::Kcal => "kcal",
            DisplayUnit::Grams => "grams",
        }
    }

    pub fn html(&self) -> &'static str {
        match self {
            DisplayUnit::KgPerSquareMeter => "kg/m<sup>2</sup>",
            other => other.text(),
        }
    }
}

/// One labelled, formatted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub label: &'static str,
    pub value: String,
    pub unit: DisplayUnit,
}

impl DisplayLine {
    fn new(label: &'static str, value: f64, unit: DisplayUnit, precision: Precision) -> Self {
        Self {
            label,
            value: precision.format(value),
            unit,
        }
    }

    fn to_html(&self) -> String {
        format!(
            "<p><strong>{}:</strong> {} {}</p>",
            self.label,
            self.value,
            self.unit.html()
        )
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, self.value, self.unit.text())
    }
}

/// Heading above the macronutrient lines
pub const AMDR_HEADING: &str = "AMDR";

/// Rendered results: the four metrics followed by the AMDR breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub metrics: Vec<DisplayLine>,
    pub amdr: Vec<DisplayLine>,
}

impl DisplayText {
    /// Every line in display order
    pub fn lines(&self) -> impl Iterator<Item = &DisplayLine> {
        self.metrics.iter().chain(self.amdr.iter())
    }

    /// Find a line by its label
    pub fn line(&self, label: &str) -> Option<&DisplayLine> {
        self.lines().find(|line| line.label == label)
    }

    /// HTML fragment for the calculator's output area
    pub fn to_html(&self) -> String {
        let mut html: Vec<String> = self.metrics.iter().map(DisplayLine::to_html).collect();
        html.push(format!("<h3>{}:</h3>", AMDR_HEADING));
        html.extend(self.amdr.iter().map(DisplayLine::to_html));
        html.join("\n")
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.metrics {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}:", AMDR_HEADING)?;
        for line in &self.amdr {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Format a results record for display
pub fn present(results: &ResultsRecord, config: &PresentConfig) -> DisplayText {
    let precision = config.precision;
    DisplayText {
        metrics: vec![
            DisplayLine::new("BMI", results.bmi, DisplayUnit::KgPerSquareMeter, precision),
            DisplayLine::new("IBW", results.ibw, DisplayUnit::Kg, precision),
            DisplayLine::new("BMR", results.bmr, DisplayUnit::Kcal, precision),
            DisplayLine::new("TEE", results.tee, DisplayUnit::Kcal, precision),
        ],
        amdr: vec![
            DisplayLine::new(
                "Carbohydrates",
                results.amdr.carbohydrates,
                DisplayUnit::Grams,
                precision,
            ),
            DisplayLine::new("Protein", results.amdr.protein, DisplayUnit::Grams, precision),
            DisplayLine::new("Fat", results.amdr.fat, DisplayUnit::Grams, precision),
        ],
    }
}
