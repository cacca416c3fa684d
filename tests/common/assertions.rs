//! Assertion utilities for testing.
//!
//! Temperature aggregates come back as JSON numbers; these helpers compare
//! them with a tolerance.

use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a statistics record carries the expected low/avg/high values.
pub fn assert_temperature_record(record: &Value, low: f64, avg: f64, high: f64) {
    let field = |key: &str| {
        record[key]
            .as_f64()
            .unwrap_or_else(|| panic!("{} missing or not a number in {}", key, record))
    };

    assert_approx_eq(field("Low Temp"), low, None);
    assert_approx_eq(field("Avg Temp"), avg, None);
    assert_approx_eq(field("High Temp"), high, None);
}

/// Assert that every aggregate of a summary record is null.
pub fn assert_empty_summary(record: &Value) {
    for key in ["Low Temp", "Avg Temp", "High Temp"] {
        assert!(
            record[key].is_null(),
            "{} should be null for an empty range, got {}",
            key,
            record[key]
        );
    }
}
