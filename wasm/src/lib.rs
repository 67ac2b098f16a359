//! Nutrition Calculator WASM Module
//!
//! This crate provides WebAssembly bindings so the calculator page can hand
//! its raw form values to the core library and write the result into its
//! output area.
//!
//! Every binding takes the form as a JSON object keyed by field id
//! (`age`, `gender`, `weight`, `heightFeet`, ...). Failures are returned as
//! a JSON error body: `{"error": {"code": "...", "message": "...", "fields": [...]}}`.

use nutrition_core::{
    compute, compute_and_present, validate, CalculatorConfig, Precision, PresentConfig, RawInputs,
    ValidationError, Variant,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
}

fn error_body(code: &str, message: String, fields: Vec<String>) -> String {
    let body = ErrorResponse {
        error: ErrorDetail {
            code: code.to_string(),
            message,
            fields,
        },
    };
    serde_json::to_string(&body)
        .unwrap_or_else(|_| format!("{{\"error\":{{\"code\":\"{}\"}}}}", code))
}

fn bad_request(message: String) -> String {
    error_body("BAD_REQUEST", message, Vec::new())
}

fn rejection(err: ValidationError) -> String {
    let fields = err
        .fields()
        .iter()
        .map(|field| field.wire_name().to_string())
        .collect();
    error_body(err.kind(), err.to_string(), fields)
}

fn parse_request(raw_json: &str, variant: &str) -> Result<(RawInputs, CalculatorConfig), String> {
    let raw: RawInputs = serde_json::from_str(raw_json)
        .map_err(|e| bad_request(format!("Invalid form data: {}", e)))?;
    let variant: Variant = variant.parse().map_err(bad_request)?;
    Ok((raw, variant.config()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| {
        error_body(
            "INTERNAL_ERROR",
            format!("Failed to encode result: {}", e),
            Vec::new(),
        )
    })
}

/// Validate a form and return the typed inputs as JSON
pub fn run_validate(raw_json: &str, variant: &str) -> Result<String, String> {
    let (raw, config) = parse_request(raw_json, variant)?;
    let inputs = validate(&raw, &config).map_err(rejection)?;
    to_json(&inputs)
}

/// Validate a form and return the results record as JSON
pub fn run_compute(raw_json: &str, variant: &str) -> Result<String, String> {
    let (raw, config) = parse_request(raw_json, variant)?;
    let results = compute(&raw, &config).map_err(rejection)?;
    to_json(&results)
}

/// Validate, compute and render the output-area HTML
///
/// An empty `precision` keeps the variant's default.
pub fn run_compute_and_present(
    raw_json: &str,
    variant: &str,
    precision: &str,
) -> Result<String, String> {
    let (raw, config) = parse_request(raw_json, variant)?;
    let present_config = if precision.trim().is_empty() {
        config.present
    } else {
        PresentConfig::from(precision.parse::<Precision>().map_err(bad_request)?)
    };
    let display = compute_and_present(&raw, &config, &present_config).map_err(rejection)?;
    Ok(display.to_html())
}

#[wasm_bindgen]
pub fn validate_inputs(raw_json: &str, variant: &str) -> Result<String, JsValue> {
    run_validate(raw_json, variant).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn compute_results(raw_json: &str, variant: &str) -> Result<String, JsValue> {
    run_compute(raw_json, variant).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn compute_and_present_html(
    raw_json: &str,
    variant: &str,
    precision: &str,
) -> Result<String, JsValue> {
    run_compute_and_present(raw_json, variant, precision).map_err(|e| JsValue::from_str(&e))
}
