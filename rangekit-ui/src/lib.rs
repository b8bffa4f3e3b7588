//! Range selection core for rangekit.
//!
//! This crate holds everything a two-thumb range control needs that is not
//! tied to a renderer: the invariant-preserving [`RangeModel`], the
//! [`track`] layout that turns a model snapshot into five pixel segments, and
//! the tolerance helpers in [`near_eq`] both of them compare with.
//!
//! # Example
//!
//! ```
//! use rangekit_ui::{
//!     NumericRangeModel, RangeModelArgs,
//!     track::{TrackArgs, arrange},
//! };
//!
//! let model = NumericRangeModel::from_args(
//!     RangeModelArgs::new(0.0, 10.0).start_value(2.0).end_value(8.0),
//! )
//! .unwrap();
//!
//! let geometry = arrange(
//!     &model.snapshot(),
//!     &TrackArgs::default().start_handle_size(10.0).end_handle_size(10.0),
//!     110.0,
//! );
//! assert!((geometry.range_length - 54.0).abs() < 1e-9);
//! ```
//!
//! # Value types
//!
//! Models are generic over a value type and an interval type, both
//! implementing [`RangeScalar`]. Plain `f64` works out of the box; with the
//! `calendar` feature (on by default) `chrono::DateTime<Utc>` and
//! `chrono::TimeDelta` do too, measured in milliseconds.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod error;
pub mod near_eq;
pub mod prop;
pub mod range_model;
pub mod scalar;
pub mod track;

pub use error::{RangeError, RangeProperty};
pub use prop::{CallbackWith, ListenerId, Listeners};
#[cfg(feature = "calendar")]
pub use range_model::CalendarRangeModel;
pub use range_model::{
    CombinedChange, IntervalChange, NumericRangeModel, RangeChange, RangeModel, RangeModelArgs,
    ValueChange,
};
pub use scalar::RangeScalar;
#[cfg(feature = "calendar")]
pub use scalar::TICKS_PER_SECOND;
pub use track::{Orientation, RangeSnapshot, TrackArgs, TrackGeometry, TrackPart};
