//! Conversion bridge between concrete range types and the `f64` space the
//! engine computes in.
//!
//! The range model is generic over a value type and an interval type. Both
//! only need to say how they map onto doubles; every comparison, clamp and
//! cascade then happens on the double representation and is converted back
//! once at the end.
//!
//! Two bridges ship with the crate:
//!
//! - `f64` maps onto itself (numeric ranges).
//! - With the `calendar` feature, `chrono::DateTime<Utc>` and
//!   `chrono::TimeDelta` map onto a millisecond tick count, so a date range
//!   and its width share the same unit.

use std::fmt::Debug;

/// A type that can travel through the double-space range engine.
///
/// `from_f64` returns `None` when the double has no counterpart in the type
/// (non-finite input, or a value outside the type's representable range).
/// Implementations must round-trip: `from_f64(v.to_f64()) == Some(v)` for every
/// value the type considers representable.
pub trait RangeScalar: Clone + PartialEq + Debug {
    /// Projects the value onto the double axis.
    fn to_f64(&self) -> f64;

    /// Builds a value from its double projection.
    fn from_f64(value: f64) -> Option<Self>;

    /// The value whose projection is zero, when one exists.
    fn zero() -> Option<Self> {
        Self::from_f64(0.0)
    }
}

impl RangeScalar for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }

    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }
}

#[cfg(feature = "calendar")]
mod calendar {
    use chrono::{DateTime, TimeDelta, Utc};

    use super::RangeScalar;

    /// Number of ticks in one second.
    pub const TICKS_PER_SECOND: f64 = 1_000.0;

    fn ticks_to_i64(value: f64) -> Option<i64> {
        if !value.is_finite() {
            return None;
        }
        let rounded = value.round();
        // `as` saturates, so anything past the i64 range is rejected here.
        if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
            return None;
        }
        Some(rounded as i64)
    }

    impl RangeScalar for DateTime<Utc> {
        fn to_f64(&self) -> f64 {
            self.timestamp_millis() as f64
        }

        fn from_f64(value: f64) -> Option<Self> {
            DateTime::from_timestamp_millis(ticks_to_i64(value)?)
        }
    }

    impl RangeScalar for TimeDelta {
        fn to_f64(&self) -> f64 {
            self.num_milliseconds() as f64
        }

        fn from_f64(value: f64) -> Option<Self> {
            TimeDelta::try_milliseconds(ticks_to_i64(value)?)
        }

        fn zero() -> Option<Self> {
            Some(TimeDelta::zero())
        }
    }
}

#[cfg(feature = "calendar")]
pub use calendar::TICKS_PER_SECOND;
