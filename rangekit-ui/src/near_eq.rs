//! Tolerant floating-point comparison.
//!
//! Range values span very different magnitudes (unit fractions next to
//! millisecond timestamps), so closeness is measured relative to the operands
//! instead of against a fixed epsilon. Every comparison that decides whether a
//! coercion or a layout clamp applies goes through this module, which keeps
//! repeated edits from flickering across a boundary because of round-trip
//! error.
//!
//! ```
//! use rangekit_ui::near_eq::{are_close, greater_than, less_than_or_close};
//!
//! assert!(are_close(0.1 + 0.2, 0.3));
//! assert!(!greater_than(0.1 + 0.2, 0.3));
//! assert!(less_than_or_close(0.3, 0.1 + 0.2));
//! ```

/// Machine epsilon for `f64`, spelled out as the tolerance base.
pub const DBL_EPSILON: f64 = 2.220_446_049_250_313_1e-16;

/// Returns `true` when `a` and `b` are equal within a magnitude-relative
/// tolerance.
pub fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let tolerance = (a.abs() + b.abs() + 10.0) * DBL_EPSILON;
    let delta = a - b;
    -tolerance < delta && tolerance > delta
}

/// `a > b` and not close.
pub fn greater_than(a: f64, b: f64) -> bool {
    a > b && !are_close(a, b)
}

/// `a < b` and not close.
pub fn less_than(a: f64, b: f64) -> bool {
    a < b && !are_close(a, b)
}

/// `a >= b`, treating close values as equal.
pub fn greater_than_or_close(a: f64, b: f64) -> bool {
    a > b || are_close(a, b)
}

/// `a <= b`, treating close values as equal.
pub fn less_than_or_close(a: f64, b: f64) -> bool {
    a < b || are_close(a, b)
}

/// Returns `true` when `value` is close to zero.
pub fn is_zero(value: f64) -> bool {
    are_close(value, 0.0)
}

/// Clamps a length into `[0, max]`.
///
/// Unlike [`f64::clamp`] this never panics: a NaN `value` or a negative or NaN
/// `max` collapses to zero.
pub fn clamp_length(value: f64, max: f64) -> f64 {
    if value.is_nan() || max.is_nan() || max <= 0.0 || value <= 0.0 {
        return 0.0;
    }
    value.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_are_close() {
        assert!(are_close(1.0, 1.0));
        assert!(are_close(0.0, -0.0));
        assert!(are_close(f64::MAX, f64::MAX));
    }

    #[test]
    fn tolerance_scales_with_magnitude() {
        // A millisecond timestamp around 2024 and its successor double.
        let ticks = 1_718_000_000_000.0_f64;
        let next = f64::from_bits(ticks.to_bits() + 1);
        assert!(are_close(ticks, next));
        assert!(!are_close(ticks, ticks + 1.0));

        assert!(are_close(0.1 + 0.2, 0.3));
        assert!(!are_close(1.0, 1.0 + 1e-9));
    }

    #[test]
    fn strict_comparisons_ignore_close_values() {
        let a = 0.1 + 0.2;
        assert!(a > 0.3);
        assert!(!greater_than(a, 0.3));
        assert!(!less_than(0.3, a));
        assert!(greater_than(2.0, 1.0));
        assert!(less_than(1.0, 2.0));
    }

    #[test]
    fn or_close_comparisons_accept_close_values() {
        assert!(greater_than_or_close(0.3, 0.1 + 0.2));
        assert!(less_than_or_close(0.1 + 0.2, 0.3));
        assert!(!greater_than_or_close(1.0, 2.0));
        assert!(!less_than_or_close(2.0, 1.0));
    }

    #[test]
    fn nan_is_never_close() {
        assert!(!are_close(f64::NAN, f64::NAN));
        assert!(!are_close(f64::NAN, 0.0));
        assert!(!greater_than(f64::NAN, 0.0));
        assert!(!less_than_or_close(f64::NAN, 0.0));
    }

    #[test]
    fn clamp_length_never_goes_negative() {
        assert_eq!(clamp_length(5.0, 10.0), 5.0);
        assert_eq!(clamp_length(15.0, 10.0), 10.0);
        assert_eq!(clamp_length(-3.0, 10.0), 0.0);
        assert_eq!(clamp_length(3.0, -1.0), 0.0);
        assert_eq!(clamp_length(f64::NAN, 10.0), 0.0);
        assert_eq!(clamp_length(f64::INFINITY, 10.0), 10.0);
    }

    #[test]
    fn is_zero_uses_tolerance() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-16));
        assert!(!is_zero(1e-10));
    }
}
