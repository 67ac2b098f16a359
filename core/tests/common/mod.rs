//! Common test utilities for pipeline tests

use nutrition_core::{Field, RawInputs};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness (RUST_LOG controls the level)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "nutrition_core=debug".into());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A complete, valid submission: 30 year old male, 70 kg, 5'7"
pub fn valid_form() -> RawInputs {
    RawInputs::default()
        .with(Field::Age, "30")
        .with(Field::Gender, "male")
        .with(Field::Weight, "70")
        .with(Field::HeightFeet, "5")
        .with(Field::HeightInches, "7")
        .with(Field::ActivityFactor, "1.1")
        .with(Field::CarbsPct, "50")
        .with(Field::ProteinPct, "20")
        .with(Field::FatPct, "30")
}

/// Assert two floats agree within `tolerance`
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} (±{}), got {}",
        expected,
        tolerance,
        actual
    );
}
