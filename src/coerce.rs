//! Coerce-or-default helpers for values crossing an untrusted boundary.
//!
//! Persisted scenes and host-supplied numeric edits arrive in arbitrary
//! shapes: strings where numbers are expected, `NaN`, missing keys. Every
//! such boundary runs its inputs through these helpers so malformed data
//! degrades to a documented default instead of poisoning the model.

#[cfg(test)]
#[path = "coerce_test.rs"]
mod coerce_test;

use serde_json::Value;

/// A finite number from `value`, or `default` when absent or not a number.
#[must_use]
pub fn num_or(value: Option<&Value>, default: f64) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

/// A finite positive number from `value`, or `default` otherwise.
///
/// `default` is assumed to be positive.
#[must_use]
pub fn positive_num_or(value: Option<&Value>, default: f64) -> f64 {
    let n = num_or(value, default);
    if n > 0.0 { n } else { default }
}

/// `value` when finite, otherwise `default`.
#[must_use]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

/// `value` when a finite positive size, otherwise `default`.
#[must_use]
pub fn size_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

/// A boolean from `value`, or `default` when absent or not a JSON boolean.
///
/// Only genuine JSON booleans count; truthy-looking strings or numbers fall
/// back to `default`.
#[must_use]
pub fn bool_or(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}

/// An owned string from `value`, or `default` when absent or not a string.
#[must_use]
pub fn str_or(value: Option<&Value>, default: &str) -> String {
    value.and_then(Value::as_str).unwrap_or(default).to_string()
}
