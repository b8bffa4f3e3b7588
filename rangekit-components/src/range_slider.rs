//! A two-thumb range slider shell over a [`RangeModel`].
//!
//! ## Usage
//!
//! Keep a [`RangeModel`] as the source of truth and drive it from pointer and
//! keyboard input through a [`RangeSliderController`]. The controller owns a
//! [`BoundTrack`], the layout element that mirrors the model's bounds and
//! endpoints and remembers the last [`TrackGeometry`], so hit testing and drag
//! conversion always use what was last laid out.
//!
//! ```
//! use rangekit_components::range_slider::{
//!     PointerPosition, RangeSliderArgs, RangeSliderController,
//! };
//! use rangekit_ui::{NumericRangeModel, RangeModelArgs, TrackArgs};
//!
//! let mut model = NumericRangeModel::from_args(
//!     RangeModelArgs::new(0.0, 10.0).start_value(2.0).end_value(8.0),
//! )
//! .unwrap();
//! let mut slider = RangeSliderController::new(
//!     RangeSliderArgs::default()
//!         .track(TrackArgs::default().start_handle_size(10.0).end_handle_size(10.0)),
//! );
//! slider.layout(&model, 110.0);
//!
//! // Grab the start handle (it sits at 18..28) and drag it 9 px right.
//! slider.press(&mut model, PointerPosition::new(20.0, 0.0)).unwrap();
//! slider.drag_to(&mut model, PointerPosition::new(29.0, 0.0)).unwrap();
//! slider.release();
//!
//! assert!((model.start_value() - 3.0).abs() < 1e-9);
//! ```

use derive_setters::Setters;
use rangekit_ui::{
    RangeModel, RangeScalar, RangeSnapshot,
    track::{TrackArgs, TrackGeometry, arrange},
};

mod interaction;

pub use interaction::{DragTarget, PointerPosition, RangeSliderController};

/// Arguments for a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Default, Setters)]
pub struct RangeSliderArgs {
    /// Handle sizes, orientation and direction of the track.
    pub track: TrackArgs,
    /// Disable interaction.
    pub disabled: bool,
}

/// Thumb that receives keyboard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusedThumb {
    /// The start handle.
    #[default]
    Start,
    /// The end handle.
    End,
}

/// A keyboard-style adjustment of the focused thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepCommand {
    /// Move down by `SmallChange`.
    SmallDecrement,
    /// Move up by `SmallChange`.
    SmallIncrement,
    /// Move down by `LargeChange`.
    LargeDecrement,
    /// Move up by `LargeChange`.
    LargeIncrement,
    /// Jump to the minimum.
    ToMinimum,
    /// Jump to the maximum.
    ToMaximum,
}

/// Layout element bound to a range model.
///
/// Binding is one-way: [`bind`](Self::bind) copies the model's bounds and
/// endpoints, and nothing here ever writes back. Writes go through the model's
/// setters, after which the track is bound again.
#[derive(Debug, Clone, Default)]
pub struct BoundTrack {
    snapshot: RangeSnapshot,
    args: TrackArgs,
    available_length: f64,
    geometry: TrackGeometry,
}

impl BoundTrack {
    /// Creates an unbound track.
    pub fn new(args: TrackArgs) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    /// Refreshes the bound values from `model` and re-runs the last layout.
    pub fn bind<T: RangeScalar, I: RangeScalar>(&mut self, model: &RangeModel<T, I>) {
        self.snapshot = model.snapshot();
        self.geometry = arrange(&self.snapshot, &self.args, self.available_length);
    }

    /// Lays the track out along `available_length` pixels.
    pub fn arrange(&mut self, available_length: f64) -> &TrackGeometry {
        self.available_length = available_length;
        self.geometry = arrange(&self.snapshot, &self.args, available_length);
        &self.geometry
    }

    /// Bound minimum.
    pub fn minimum(&self) -> f64 {
        self.snapshot.minimum
    }

    /// Bound maximum.
    pub fn maximum(&self) -> f64 {
        self.snapshot.maximum
    }

    /// Bound start value.
    pub fn start_value(&self) -> f64 {
        self.snapshot.start
    }

    /// Bound end value.
    pub fn end_value(&self) -> f64 {
        self.snapshot.end
    }

    /// All bound values at once.
    pub fn snapshot(&self) -> RangeSnapshot {
        self.snapshot
    }

    /// Geometry of the last layout pass.
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Length passed to the last layout pass.
    pub fn available_length(&self) -> f64 {
        self.available_length
    }

    /// Track arguments in use.
    pub fn args(&self) -> &TrackArgs {
        &self.args
    }

    /// Replaces the track arguments and re-runs the last layout.
    pub fn set_args(&mut self, args: TrackArgs) {
        self.args = args;
        self.geometry = arrange(&self.snapshot, &self.args, self.available_length);
    }
}
