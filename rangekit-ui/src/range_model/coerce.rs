//! Pure coercion functions in double space.
//!
//! Each function takes a candidate and the current model state and returns
//! `None` when the candidate already satisfies every invariant, or
//! `Some(adjusted)` otherwise. Returning `None` lets the caller keep the
//! candidate untouched instead of rebuilding it from its double projection.

use crate::near_eq::{greater_than, less_than};

/// Double-space view of the model used while coercing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CoerceState {
    pub minimum: f64,
    pub maximum: f64,
    pub start: f64,
    pub end: f64,
    pub min_range: f64,
    pub min_range_enabled: bool,
    pub is_single_value: bool,
}

impl CoerceState {
    fn enforces_min_range(&self) -> bool {
        self.min_range_enabled && !self.is_single_value
    }
}

/// Coerces a start-value candidate.
///
/// Step order is fixed: far bound, min-range against the end, lower bound,
/// then ordering against the end. Moving the min-range check before the lower
/// bound keeps the bound clamp from reintroducing a width violation, and the
/// ordering clamp runs last so `start <= end` always survives.
pub(crate) fn coerce_start(candidate: f64, state: &CoerceState) -> Option<f64> {
    let mut value = candidate;

    // The steps below never look at the maximum, so a candidate past it is
    // pulled back first.
    if greater_than(value, state.maximum) {
        value = state.maximum;
    }
    if state.enforces_min_range() && less_than(state.end - value, state.min_range) {
        value = state.end - state.min_range;
    }
    if less_than(value, state.minimum) {
        value = state.minimum;
    }
    if !state.is_single_value && greater_than(value, state.end) {
        value = state.end;
    }

    (value != candidate).then_some(value)
}

/// Coerces an end-value candidate; the mirror of [`coerce_start`].
pub(crate) fn coerce_end(candidate: f64, state: &CoerceState) -> Option<f64> {
    let mut value = candidate;

    if less_than(value, state.minimum) {
        value = state.minimum;
    }
    if state.enforces_min_range() && less_than(value - state.start, state.min_range) {
        value = state.start + state.min_range;
    }
    if greater_than(value, state.maximum) {
        value = state.maximum;
    }
    if !state.is_single_value && less_than(value, state.start) {
        value = state.start;
    }

    (value != candidate).then_some(value)
}

/// Keeps the maximum at or above the minimum.
pub(crate) fn coerce_maximum(candidate: f64, minimum: f64) -> Option<f64> {
    less_than(candidate, minimum).then_some(minimum)
}

/// Keeps the minimum range inside `[0, maximum - minimum]`.
pub(crate) fn coerce_min_range(candidate: f64, minimum: f64, maximum: f64) -> Option<f64> {
    let span = (maximum - minimum).max(0.0);
    if greater_than(candidate, span) {
        Some(span)
    } else if candidate < 0.0 {
        Some(0.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(start: f64, end: f64, min_range: f64) -> CoerceState {
        CoerceState {
            minimum: 0.0,
            maximum: 100.0,
            start,
            end,
            min_range,
            min_range_enabled: true,
            is_single_value: false,
        }
    }

    #[test]
    fn valid_start_is_left_alone() {
        assert_eq!(coerce_start(10.0, &state(20.0, 30.0, 10.0)), None);
        assert_eq!(coerce_start(20.0, &state(20.0, 30.0, 10.0)), None);
    }

    #[test]
    fn start_sticks_to_min_range() {
        assert_eq!(coerce_start(25.0, &state(20.0, 30.0, 10.0)), Some(20.0));
    }

    #[test]
    fn min_range_is_checked_before_lower_bound() {
        // end - min_range lies below the minimum: the lower bound wins.
        assert_eq!(coerce_start(3.0, &state(0.0, 5.0, 10.0)), Some(0.0));
    }

    #[test]
    fn ordering_clamp_runs_last() {
        let mut s = state(20.0, 30.0, 0.0);
        s.min_range_enabled = false;
        assert_eq!(coerce_start(45.0, &s), Some(30.0));
        assert_eq!(coerce_end(5.0, &s), Some(20.0));
    }

    #[test]
    fn far_bound_pulls_start_back_inside() {
        let mut s = state(20.0, 30.0, 10.0);
        s.maximum = 15.0;
        // Past the maximum, then min-range against the (stale) end is fine.
        assert_eq!(coerce_start(20.0, &s), Some(15.0));
    }

    #[test]
    fn end_mirrors_start() {
        assert_eq!(coerce_end(25.0, &state(20.0, 30.0, 10.0)), Some(30.0));
        assert_eq!(coerce_end(150.0, &state(20.0, 30.0, 10.0)), Some(100.0));
        assert_eq!(coerce_end(-10.0, &state(0.0, 30.0, 0.0)), Some(0.0));
    }

    #[test]
    fn single_value_skips_min_range_and_ordering() {
        let mut s = state(20.0, 20.0, 10.0);
        s.is_single_value = true;
        assert_eq!(coerce_start(40.0, &s), None);
        assert_eq!(coerce_end(5.0, &s), None);
        assert_eq!(coerce_end(120.0, &s), Some(100.0));
    }

    #[test]
    fn rounding_noise_does_not_trigger_coercion() {
        let s = state(0.1 + 0.2, 10.0, 0.0);
        assert_eq!(coerce_end(0.3, &s), None);
    }

    #[test]
    fn bounds_and_min_range_coercion() {
        assert_eq!(coerce_maximum(-5.0, 0.0), Some(0.0));
        assert_eq!(coerce_maximum(5.0, 0.0), None);
        assert_eq!(coerce_min_range(20.0, 0.0, 15.0), Some(15.0));
        assert_eq!(coerce_min_range(10.0, 0.0, 15.0), None);
        assert_eq!(coerce_min_range(-1.0, 0.0, 15.0), Some(0.0));
    }
}
