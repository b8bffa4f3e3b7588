//! # Range model
//!
//! A generic, invariant-preserving model of a selected interval inside closed
//! bounds. It backs every range control in the workspace.
//!
//! ## Invariants
//!
//! After every public call:
//!
//! 1. `minimum <= start_value <= end_value <= maximum`.
//! 2. Outside single-value mode, with min-range enforcement on,
//!    `end_value - start_value >= min_range_value`.
//! 3. In single-value mode `start_value == end_value` and `range_value` is
//!    zero.
//! 4. `0 <= min_range_value <= maximum - minimum`.
//! 5. Every stored value projects onto a finite double.
//!
//! Violations are never reported; they are repaired by coercion. Only
//! malformed input (non-finite, negative widths, or doubles the value type
//! cannot represent) is rejected with a [`RangeError`], and the property then
//! keeps its previous value.
//!
//! ## Cascades
//!
//! Every setter validates, coerces, stores only if the value changed, and then
//! re-coerces the dependent properties in a fixed order:
//!
//! | Changed | Re-coerced, in order |
//! | --- | --- |
//! | minimum | maximum, min-range, start, end |
//! | maximum | min-range, start, end |
//! | min-range | start, end |
//! | start | end (forced to start in single-value mode), then range value |
//! | end | start (forced to end in single-value mode), then range value |
//!
//! The order decides which invariant wins in edge cases, so it is part of the
//! contract.
//!
//! ## Example
//!
//! ```
//! use rangekit_ui::{NumericRangeModel, RangeModelArgs};
//!
//! let mut model = NumericRangeModel::from_args(
//!     RangeModelArgs::new(0.0, 100.0)
//!         .start_value(20.0)
//!         .end_value(30.0)
//!         .min_range_value(10.0),
//! )
//! .unwrap();
//!
//! // Pulling the start up would shrink the interval below the minimum range.
//! model.set_start_value(25.0).unwrap();
//! assert_eq!(model.start_value(), 20.0);
//! ```

use std::{fmt, mem};

use derive_setters::Setters;
use tracing::{debug, trace, warn};

use crate::{
    error::{RangeError, RangeProperty},
    near_eq::greater_than,
    prop::{CallbackWith, ListenerId, Listeners},
    scalar::RangeScalar,
    track::RangeSnapshot,
};

pub use change::{CombinedChange, IntervalChange, RangeChange, ValueChange};

mod change;
mod coerce;

use coerce::CoerceState;

/// Nested re-coercions deeper than this are abandoned.
const MAX_CASCADE_DEPTH: usize = 32;

const SMALL_CHANGE_FRACTION: f64 = 0.01;
const LARGE_CHANGE_FRACTION: f64 = 0.1;

/// Construction arguments for a [`RangeModel`].
///
/// Unset endpoints default to the bounds, an unset minimum range to zero, and
/// unset step sizes to 1% and 10% of the span.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct RangeModelArgs<T, I> {
    /// Lower bound.
    pub minimum: T,
    /// Upper bound.
    pub maximum: T,
    /// Initial start value.
    #[setters(strip_option)]
    pub start_value: Option<T>,
    /// Initial end value.
    #[setters(strip_option)]
    pub end_value: Option<T>,
    /// Smallest permitted interval width.
    #[setters(strip_option)]
    pub min_range_value: Option<I>,
    /// Step used for fine adjustments.
    #[setters(strip_option)]
    pub small_change: Option<I>,
    /// Step used for coarse adjustments.
    #[setters(strip_option)]
    pub large_change: Option<I>,
    /// Start in single-value mode.
    pub is_single_value: bool,
    /// Whether min-range enforcement is on whenever single-value mode is off.
    ///
    /// Controls pick their own policy here; a zoom bar typically keeps it on,
    /// a plain range slider may not.
    pub min_range_enabled_by_default: bool,
}

impl<T, I> RangeModelArgs<T, I> {
    /// Arguments for a model spanning `minimum..=maximum`.
    pub fn new(minimum: T, maximum: T) -> Self {
        Self {
            minimum,
            maximum,
            start_value: None,
            end_value: None,
            min_range_value: None,
            small_change: None,
            large_change: None,
            is_single_value: false,
            min_range_enabled_by_default: true,
        }
    }
}

impl Default for RangeModelArgs<f64, f64> {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(feature = "calendar")]
impl Default for RangeModelArgs<chrono::DateTime<chrono::Utc>, chrono::TimeDelta> {
    fn default() -> Self {
        let epoch = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
        Self::new(epoch, epoch + chrono::TimeDelta::days(1))
    }
}

/// Invariant-preserving range state, generic over a value type `T` and an
/// interval type `I`.
pub struct RangeModel<T, I> {
    minimum: T,
    maximum: T,
    start_value: T,
    end_value: T,
    min_range_value: I,
    range_value: I,
    small_change: I,
    large_change: I,
    is_single_value: bool,
    min_range_enabled: bool,
    min_range_enabled_by_default: bool,
    suppress_value_changed: bool,
    listeners: Listeners<RangeChange<T, I>>,
}

/// Range model over plain numbers.
pub type NumericRangeModel = RangeModel<f64, f64>;

/// Range model over UTC dates with durations as widths.
#[cfg(feature = "calendar")]
pub type CalendarRangeModel = RangeModel<chrono::DateTime<chrono::Utc>, chrono::TimeDelta>;

fn finite<V: RangeScalar>(property: RangeProperty, value: &V) -> Result<f64, RangeError> {
    let projected = value.to_f64();
    if projected.is_finite() {
        Ok(projected)
    } else {
        debug!(%property, value = projected, "rejected non-finite range input");
        Err(RangeError::NonFinite {
            property,
            value: projected,
        })
    }
}

fn non_negative<V: RangeScalar>(property: RangeProperty, value: &V) -> Result<f64, RangeError> {
    let projected = finite(property, value)?;
    if projected < 0.0 {
        debug!(%property, value = projected, "rejected negative range input");
        return Err(RangeError::Negative {
            property,
            value: projected,
        });
    }
    Ok(projected)
}

/// Keeps `candidate` when coercion left it alone, otherwise rebuilds the value
/// from the adjusted double.
fn settle<V: RangeScalar>(
    property: RangeProperty,
    candidate: V,
    adjusted: Option<f64>,
) -> Result<V, RangeError> {
    match adjusted {
        None => Ok(candidate),
        Some(value) => V::from_f64(value).ok_or(RangeError::Unrepresentable { property, value }),
    }
}

fn interval_from<I: RangeScalar>(property: RangeProperty, value: f64) -> Result<I, RangeError> {
    I::from_f64(value).ok_or(RangeError::Unrepresentable { property, value })
}

impl<T: RangeScalar, I: RangeScalar> RangeModel<T, I> {
    /// Builds a model, applying the arguments through the regular setters so
    /// the result already satisfies every invariant.
    pub fn from_args(args: RangeModelArgs<T, I>) -> Result<Self, RangeError> {
        let minimum_f64 = finite(RangeProperty::Minimum, &args.minimum)?;
        let maximum_f64 = finite(RangeProperty::Maximum, &args.maximum)?;
        let zero = I::zero().ok_or(RangeError::Unrepresentable {
            property: RangeProperty::RangeValue,
            value: 0.0,
        })?;

        let mut model = Self {
            minimum: args.minimum.clone(),
            maximum: args.minimum.clone(),
            start_value: args.minimum.clone(),
            end_value: args.minimum.clone(),
            min_range_value: zero.clone(),
            range_value: zero.clone(),
            small_change: zero.clone(),
            large_change: zero,
            is_single_value: false,
            min_range_enabled: args.min_range_enabled_by_default,
            min_range_enabled_by_default: args.min_range_enabled_by_default,
            suppress_value_changed: false,
            listeners: Listeners::new(),
        };

        model.set_maximum(args.maximum.clone())?;

        let span = (maximum_f64 - minimum_f64).max(0.0);
        let small_change = match args.small_change {
            Some(step) => step,
            None => interval_from(RangeProperty::SmallChange, span * SMALL_CHANGE_FRACTION)?,
        };
        let large_change = match args.large_change {
            Some(step) => step,
            None => interval_from(RangeProperty::LargeChange, span * LARGE_CHANGE_FRACTION)?,
        };
        model.set_small_change(small_change)?;
        model.set_large_change(large_change)?;

        if let Some(min_range) = args.min_range_value {
            model.set_min_range_value(min_range)?;
        }
        // End first: the start would otherwise be clamped against the
        // provisional end sitting on the minimum.
        model.set_end_value(args.end_value.unwrap_or(args.maximum))?;
        model.set_start_value(args.start_value.unwrap_or(args.minimum))?;
        model.set_is_single_value(args.is_single_value);

        Ok(model)
    }

    /// Lower bound.
    pub fn minimum(&self) -> T {
        self.minimum.clone()
    }

    /// Upper bound.
    pub fn maximum(&self) -> T {
        self.maximum.clone()
    }

    /// Start of the selected interval.
    pub fn start_value(&self) -> T {
        self.start_value.clone()
    }

    /// End of the selected interval.
    pub fn end_value(&self) -> T {
        self.end_value.clone()
    }

    /// Smallest permitted interval width.
    pub fn min_range_value(&self) -> I {
        self.min_range_value.clone()
    }

    /// Current interval width; zero in single-value mode.
    pub fn range_value(&self) -> I {
        self.range_value.clone()
    }

    /// Step used for fine adjustments.
    pub fn small_change(&self) -> I {
        self.small_change.clone()
    }

    /// Step used for coarse adjustments.
    pub fn large_change(&self) -> I {
        self.large_change.clone()
    }

    /// Whether start and end are locked together.
    pub fn is_single_value(&self) -> bool {
        self.is_single_value
    }

    /// Whether the minimum range is currently enforced.
    pub fn is_min_range_enabled(&self) -> bool {
        self.min_range_enabled
    }

    /// The per-control enforcement policy used outside single-value mode.
    pub fn min_range_enabled_by_default(&self) -> bool {
        self.min_range_enabled_by_default
    }

    /// Double-space view of the bounds and endpoints.
    pub fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot {
            minimum: self.minimum.to_f64(),
            maximum: self.maximum.to_f64(),
            start: self.start_value.to_f64(),
            end: self.end_value.to_f64(),
        }
    }

    /// Registers a change listener.
    ///
    /// Listeners run synchronously inside the setter that caused the change,
    /// in subscription order.
    pub fn subscribe(
        &mut self,
        listener: impl Into<CallbackWith<RangeChange<T, I>>>,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a change listener. Returns `false` when `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Sets the lower bound, then re-coerces maximum, min-range, start and end.
    pub fn set_minimum(&mut self, value: T) -> Result<(), RangeError> {
        finite(RangeProperty::Minimum, &value)?;
        self.transact(|model| {
            model.apply_minimum(value);
            Ok(())
        })
    }

    /// Sets the upper bound (kept at or above the minimum), then re-coerces
    /// min-range, start and end.
    pub fn set_maximum(&mut self, value: T) -> Result<(), RangeError> {
        finite(RangeProperty::Maximum, &value)?;
        self.transact(|model| model.apply_maximum(value))
    }

    /// Sets the start value.
    pub fn set_start_value(&mut self, value: T) -> Result<(), RangeError> {
        finite(RangeProperty::StartValue, &value)?;
        self.transact(|model| model.apply_start(value, 0))
    }

    /// Sets the end value.
    pub fn set_end_value(&mut self, value: T) -> Result<(), RangeError> {
        finite(RangeProperty::EndValue, &value)?;
        self.transact(|model| model.apply_end(value, 0))
    }

    /// Sets the minimum interval width, kept within `[0, maximum - minimum]`.
    pub fn set_min_range_value(&mut self, value: I) -> Result<(), RangeError> {
        non_negative(RangeProperty::MinRangeValue, &value)?;
        self.transact(|model| model.apply_min_range(value))
    }

    /// Sets the fine adjustment step. Not coerced against the range.
    pub fn set_small_change(&mut self, value: I) -> Result<(), RangeError> {
        non_negative(RangeProperty::SmallChange, &value)?;
        self.small_change = value;
        Ok(())
    }

    /// Sets the coarse adjustment step. Not coerced against the range.
    pub fn set_large_change(&mut self, value: I) -> Result<(), RangeError> {
        non_negative(RangeProperty::LargeChange, &value)?;
        self.large_change = value;
        Ok(())
    }

    /// Toggles single-value mode.
    ///
    /// Entering it turns min-range enforcement off, collapses the end onto the
    /// start and pins the range value at zero. Leaving it restores the
    /// per-control enforcement policy and widens the interval again if the
    /// minimum range requires it.
    pub fn set_is_single_value(&mut self, value: bool) {
        self.notify_interval(|model| model.apply_single_value(value));
    }

    /// Changes the enforcement policy applied outside single-value mode.
    pub fn set_min_range_enabled_by_default(&mut self, enabled: bool) {
        self.min_range_enabled_by_default = enabled;
        if self.is_single_value || self.min_range_enabled == enabled {
            return;
        }
        self.notify_interval(|model| {
            model.min_range_enabled = enabled;
            model.restore_min_range();
            model.refresh_range_value();
        });
    }

    /// Opens a combined change; see [`CombinedChange`].
    pub fn combined_change(&mut self) -> CombinedChange<'_, T, I> {
        CombinedChange::begin(self)
    }

    /// Moves both endpoints as one change, raising a single combined
    /// notification.
    ///
    /// The endpoint leading the move is written first, so shifting a
    /// min-range-constrained interval is not blocked by its own width.
    pub fn set_range(&mut self, start: T, end: T) -> Result<(), RangeError> {
        let start_f64 = finite(RangeProperty::StartValue, &start)?;
        finite(RangeProperty::EndValue, &end)?;

        let moving_up = greater_than(start_f64, self.start_value.to_f64());
        let mut change = self.combined_change();
        if moving_up {
            change.set_end_value(end)?;
            change.set_start_value(start)
        } else {
            change.set_start_value(start)?;
            change.set_end_value(end)
        }
    }

    fn coerce_state(&self) -> CoerceState {
        CoerceState {
            minimum: self.minimum.to_f64(),
            maximum: self.maximum.to_f64(),
            start: self.start_value.to_f64(),
            end: self.end_value.to_f64(),
            min_range: self.min_range_value.to_f64(),
            min_range_enabled: self.min_range_enabled,
            is_single_value: self.is_single_value,
        }
    }

    fn emit(&self, change: RangeChange<T, I>) {
        self.listeners.notify(&change);
    }

    /// Runs one public write and raises the combined value notification for
    /// it.
    fn transact(
        &mut self,
        write: impl FnOnce(&mut Self) -> Result<(), RangeError>,
    ) -> Result<(), RangeError> {
        let mut result = Ok(());
        self.notify_interval(|model| result = write(model));
        result
    }

    /// Runs a write that cannot be rejected and raises the combined value
    /// notification for it.
    fn notify_interval(&mut self, write: impl FnOnce(&mut Self)) {
        let old_start = self.start_value.clone();
        let old_end = self.end_value.clone();
        write(self);
        self.raise_value_changed(&old_start, &old_end);
    }

    pub(crate) fn raise_value_changed(&self, old_start: &T, old_end: &T) {
        if self.suppress_value_changed {
            return;
        }
        if *old_start == self.start_value && *old_end == self.end_value {
            return;
        }
        self.emit(RangeChange::Value(IntervalChange {
            old_start: old_start.clone(),
            old_end: old_end.clone(),
            new_start: self.start_value.clone(),
            new_end: self.end_value.clone(),
        }));
    }

    fn apply_minimum(&mut self, value: T) {
        if value == self.minimum {
            return;
        }
        let old = mem::replace(&mut self.minimum, value.clone());
        self.emit(RangeChange::Minimum(ValueChange::new(old, value)));

        trace!("minimum changed; re-coercing maximum, min-range, start, end");
        self.recoerce_maximum();
        self.recoerce_min_range();
        self.recoerce_start(1);
        self.recoerce_end(1);
    }

    fn apply_maximum(&mut self, candidate: T) -> Result<(), RangeError> {
        let adjusted = coerce::coerce_maximum(candidate.to_f64(), self.minimum.to_f64());
        let value = settle(RangeProperty::Maximum, candidate, adjusted)?;
        if value == self.maximum {
            return Ok(());
        }
        let old = mem::replace(&mut self.maximum, value.clone());
        self.emit(RangeChange::Maximum(ValueChange::new(old, value)));

        trace!("maximum changed; re-coercing min-range, start, end");
        self.recoerce_min_range();
        self.recoerce_start(1);
        self.recoerce_end(1);
        Ok(())
    }

    fn apply_min_range(&mut self, candidate: I) -> Result<(), RangeError> {
        let adjusted = coerce::coerce_min_range(
            candidate.to_f64(),
            self.minimum.to_f64(),
            self.maximum.to_f64(),
        );
        let value = settle(RangeProperty::MinRangeValue, candidate, adjusted)?;
        if value == self.min_range_value {
            return Ok(());
        }
        let old = mem::replace(&mut self.min_range_value, value.clone());
        self.emit(RangeChange::MinRangeValue(ValueChange::new(old, value)));

        trace!("min-range changed; re-coercing start, end");
        self.recoerce_start(1);
        self.recoerce_end(1);
        Ok(())
    }

    fn apply_start(&mut self, candidate: T, depth: usize) -> Result<(), RangeError> {
        let adjusted = coerce::coerce_start(candidate.to_f64(), &self.coerce_state());
        let value = settle(RangeProperty::StartValue, candidate, adjusted)?;
        if value == self.start_value {
            return Ok(());
        }
        let old = mem::replace(&mut self.start_value, value.clone());
        self.emit(RangeChange::StartValue(ValueChange::new(old, value)));

        if depth >= MAX_CASCADE_DEPTH {
            warn!(depth, "range cascade depth limit reached after start change");
            return Ok(());
        }
        if self.is_single_value {
            let start = self.start_value.clone();
            self.force_end(start, depth + 1);
        } else {
            self.recoerce_end(depth + 1);
            self.refresh_range_value();
        }
        Ok(())
    }

    fn apply_end(&mut self, candidate: T, depth: usize) -> Result<(), RangeError> {
        let adjusted = coerce::coerce_end(candidate.to_f64(), &self.coerce_state());
        let value = settle(RangeProperty::EndValue, candidate, adjusted)?;
        if value == self.end_value {
            return Ok(());
        }
        let old = mem::replace(&mut self.end_value, value.clone());
        self.emit(RangeChange::EndValue(ValueChange::new(old, value)));

        if depth >= MAX_CASCADE_DEPTH {
            warn!(depth, "range cascade depth limit reached after end change");
            return Ok(());
        }
        if self.is_single_value {
            let end = self.end_value.clone();
            self.force_start(end, depth + 1);
        } else {
            self.recoerce_start(depth + 1);
            self.refresh_range_value();
        }
        Ok(())
    }

    fn apply_single_value(&mut self, value: bool) {
        if value == self.is_single_value {
            return;
        }
        self.is_single_value = value;
        self.emit(RangeChange::IsSingleValue(ValueChange::new(!value, value)));

        if value {
            trace!("entering single-value mode");
            self.min_range_enabled = false;
            let start = self.start_value.clone();
            self.force_end(start, 1);
        } else {
            trace!("leaving single-value mode");
            self.min_range_enabled = self.min_range_enabled_by_default;
            self.restore_min_range();
        }
        self.refresh_range_value();
    }

    /// Widens the interval after enforcement comes back on: the end moves up
    /// first, and the start moves down when the end is pinned at the maximum.
    fn restore_min_range(&mut self) {
        self.recoerce_end(1);
        self.recoerce_start(1);
    }

    fn recoerce_maximum(&mut self) {
        let current = self.maximum.clone();
        if let Err(err) = self.apply_maximum(current) {
            warn!(%err, "keeping previous maximum");
        }
    }

    fn recoerce_min_range(&mut self) {
        let current = self.min_range_value.clone();
        if let Err(err) = self.apply_min_range(current) {
            warn!(%err, "keeping previous minimum range");
        }
    }

    fn recoerce_start(&mut self, depth: usize) {
        let current = self.start_value.clone();
        self.force_start(current, depth);
    }

    fn recoerce_end(&mut self, depth: usize) {
        let current = self.end_value.clone();
        self.force_end(current, depth);
    }

    fn force_start(&mut self, candidate: T, depth: usize) {
        if let Err(err) = self.apply_start(candidate, depth) {
            warn!(%err, "keeping previous start value");
        }
    }

    fn force_end(&mut self, candidate: T, depth: usize) {
        if let Err(err) = self.apply_end(candidate, depth) {
            warn!(%err, "keeping previous end value");
        }
    }

    fn refresh_range_value(&mut self) {
        let width = if self.is_single_value {
            0.0
        } else {
            self.end_value.to_f64() - self.start_value.to_f64()
        };
        let Some(value) = I::from_f64(width) else {
            warn!(width, "range value not representable; keeping previous");
            return;
        };
        if value == self.range_value {
            return;
        }
        let old = mem::replace(&mut self.range_value, value.clone());
        self.emit(RangeChange::RangeValue(ValueChange::new(old, value)));
    }
}

impl<T: fmt::Debug, I: fmt::Debug> fmt::Debug for RangeModel<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeModel")
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("min_range_value", &self.min_range_value)
            .field("range_value", &self.range_value)
            .field("small_change", &self.small_change)
            .field("large_change", &self.large_change)
            .field("is_single_value", &self.is_single_value)
            .field("min_range_enabled", &self.min_range_enabled)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
