//! Numeric normalisation shared by every engine layer.
//!
//! Log rows arrive with hand-entered numbers. Instead of validating them, the
//! engine clamps anything negative or non-finite to zero at the point of use
//! and turns divisions by zero into zero, so no `NaN` or infinity ever reaches
//! a metrics record.

/// Clamps negative and non-finite values to `0.0`.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Normalises an optional stored value, treating absence as zero.
pub fn stored(value: Option<f64>) -> f64 {
    value.map_or(0.0, non_negative)
}

/// Divides two quantities, returning `0.0` when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    let numerator = if numerator.is_finite() { numerator } else { 0.0 };
    if denominator.is_finite() && denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Resolves a derived field against a previously stored value.
///
/// 1. a positive derived value wins
/// 2. otherwise a stored value, normalised
/// 3. otherwise zero
///
/// A recomputation that yields nothing never erases a stored figure, which is
/// what keeps rows with missing clock times meaningful.
pub fn resolve_minutes(derived: f64, stored_value: Option<f64>) -> f64 {
    let derived = non_negative(derived);
    if derived > 0.0 {
        return derived;
    }
    stored(stored_value)
}

/// Arithmetic mean of a slice, zero when empty.
pub fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}
