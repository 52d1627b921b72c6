//! Numeric tolerance shared by every ledger comparison.
//!
//! Amounts are plain `f64` values and are never compared with `==`. The
//! helpers below are the only place where "zero" and "equal" are decided.

/// Slack below which an amount is treated as zero.
pub const TOLERANCE: f64 = 0.01;

/// Returns `true` when `value` is within [`TOLERANCE`] of zero.
///
/// ```rust
/// use engine::is_negligible;
///
/// assert!(is_negligible(0.004));
/// assert!(is_negligible(-0.009));
/// assert!(!is_negligible(0.01));
/// ```
#[must_use]
pub fn is_negligible(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// Returns `true` when `a` and `b` differ by at most [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns `true` for finite values strictly greater than zero.
pub(crate) fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Returns `true` for finite values greater than or equal to zero.
pub(crate) fn is_non_negative_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
