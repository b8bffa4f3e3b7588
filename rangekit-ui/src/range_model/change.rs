//! Change notifications and combined-change suppression.

use crate::{error::RangeError, scalar::RangeScalar};

use super::RangeModel;

/// Old and new value of a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange<V> {
    /// Value before the write.
    pub old: V,
    /// Value after the write.
    pub new: V,
}

impl<V> ValueChange<V> {
    /// Pairs an old and a new value.
    pub fn new(old: V, new: V) -> Self {
        Self { old, new }
    }
}

/// Both endpoints before and after one logical change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalChange<T> {
    /// Start value before the change.
    pub old_start: T,
    /// End value before the change.
    pub old_end: T,
    /// Start value after the change settled.
    pub new_start: T,
    /// End value after the change settled.
    pub new_end: T,
}

/// A notification raised by a [`RangeModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum RangeChange<T, I> {
    /// `Minimum` changed.
    Minimum(ValueChange<T>),
    /// `Maximum` changed.
    Maximum(ValueChange<T>),
    /// `StartValue` changed.
    StartValue(ValueChange<T>),
    /// `EndValue` changed.
    EndValue(ValueChange<T>),
    /// `MinRangeValue` changed.
    MinRangeValue(ValueChange<I>),
    /// The derived `RangeValue` changed.
    RangeValue(ValueChange<I>),
    /// Single-value mode was toggled.
    IsSingleValue(ValueChange<bool>),
    /// Combined notification for the selected interval.
    ///
    /// Raised once per setter call that moved either endpoint, or once per
    /// [`CombinedChange`] when the writes were grouped.
    Value(IntervalChange<T>),
}

/// Groups start and end writes into one logical interval move.
///
/// While the guard lives, the per-write [`RangeChange::Value`] notification
/// is suppressed. Dropping the guard raises a single merged notification
/// carrying the endpoints from before the guard was opened and the settled
/// endpoints, if anything moved. Nested guards merge into the outermost one.
///
/// # Examples
///
/// ```
/// use rangekit_ui::{NumericRangeModel, RangeModelArgs};
///
/// let mut model = NumericRangeModel::from_args(
///     RangeModelArgs::new(0.0, 100.0).start_value(20.0).end_value(30.0),
/// )
/// .unwrap();
/// {
///     let mut change = model.combined_change();
///     change.set_end_value(60.0).unwrap();
///     change.set_start_value(50.0).unwrap();
/// }
/// assert_eq!((model.start_value(), model.end_value()), (50.0, 60.0));
/// ```
pub struct CombinedChange<'a, T: RangeScalar, I: RangeScalar> {
    model: &'a mut RangeModel<T, I>,
    old_start: T,
    old_end: T,
    was_suppressed: bool,
}

impl<'a, T: RangeScalar, I: RangeScalar> CombinedChange<'a, T, I> {
    pub(super) fn begin(model: &'a mut RangeModel<T, I>) -> Self {
        let was_suppressed = model.suppress_value_changed;
        model.suppress_value_changed = true;
        Self {
            old_start: model.start_value.clone(),
            old_end: model.end_value.clone(),
            model,
            was_suppressed,
        }
    }

    /// Writes the start value without raising the combined notification.
    pub fn set_start_value(&mut self, value: T) -> Result<(), RangeError> {
        self.model.set_start_value(value)
    }

    /// Writes the end value without raising the combined notification.
    pub fn set_end_value(&mut self, value: T) -> Result<(), RangeError> {
        self.model.set_end_value(value)
    }

    /// The model being changed.
    pub fn model(&self) -> &RangeModel<T, I> {
        self.model
    }
}

impl<T: RangeScalar, I: RangeScalar> Drop for CombinedChange<'_, T, I> {
    fn drop(&mut self) {
        self.model.suppress_value_changed = self.was_suppressed;
        self.model.raise_value_changed(&self.old_start, &self.old_end);
    }
}
