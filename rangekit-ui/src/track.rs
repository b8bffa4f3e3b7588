//! # Track layout
//!
//! Converts a range snapshot into the five pixel segments a range control
//! positions along its track:
//!
//! ```text
//! | decrease | start | range | end | increase |
//! ```
//!
//! The decrease and increase buttons cover the value space below the start
//! and above the end, the two handles keep their measured sizes, and the
//! range handle takes whatever is left between them. The inverse mapping,
//! [`value_from_distance`], turns a pointer drag back into a value delta using
//! the same density.
//!
//! Layout is a pure function of its inputs: nothing is cached between calls
//! and a layout pass never fails. Degenerate inputs produce zero-length
//! segments instead of NaN or negative lengths.
//!
//! ## Orientation
//!
//! A horizontal track lays the segments out left to right in the order above.
//! A vertical track lays them out top to bottom as
//! `increase, end, range, start, decrease`, because values grow upward while
//! pixel rows grow downward. `is_direction_reversed` swaps the two orders.
//!
//! ## Example
//!
//! ```
//! use rangekit_ui::track::{RangeSnapshot, TrackArgs, arrange};
//!
//! let snapshot = RangeSnapshot {
//!     minimum: 0.0,
//!     maximum: 10.0,
//!     start: 2.0,
//!     end: 8.0,
//! };
//! let args = TrackArgs::default()
//!     .start_handle_size(10.0)
//!     .end_handle_size(10.0);
//! let geometry = arrange(&snapshot, &args, 110.0);
//! assert!((geometry.decrease_length - 18.0).abs() < 1e-9);
//! assert!((geometry.range_length - 54.0).abs() < 1e-9);
//! ```

use derive_setters::Setters;

use crate::near_eq::{clamp_length, greater_than};

/// Axis along which a track is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Values grow to the right.
    #[default]
    Horizontal,
    /// Values grow upward.
    Vertical,
}

/// One of the five regions of a range track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackPart {
    /// Region covering values below the start.
    DecreaseButton,
    /// Handle sitting on the start value.
    StartHandle,
    /// Region between the two handles.
    RangeHandle,
    /// Handle sitting on the end value.
    EndHandle,
    /// Region covering values above the end.
    IncreaseButton,
}

const LOGICAL_ORDER: [TrackPart; 5] = [
    TrackPart::DecreaseButton,
    TrackPart::StartHandle,
    TrackPart::RangeHandle,
    TrackPart::EndHandle,
    TrackPart::IncreaseButton,
];

/// Double-space view of a range model, as consumed by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeSnapshot {
    /// Lower bound.
    pub minimum: f64,
    /// Upper bound.
    pub maximum: f64,
    /// Start of the selected interval.
    pub start: f64,
    /// End of the selected interval.
    pub end: f64,
}

/// Measured inputs of a track layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Setters)]
pub struct TrackArgs {
    /// Length of the start handle along the track axis.
    pub start_handle_size: f64,
    /// Length of the end handle along the track axis.
    pub end_handle_size: f64,
    /// Axis of the track.
    pub orientation: Orientation,
    /// Swaps the start and end sides of the track.
    pub is_direction_reversed: bool,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// Length of the decrease button.
    pub decrease_length: f64,
    /// Length of the start handle.
    pub start_length: f64,
    /// Length of the range handle.
    pub range_length: f64,
    /// Length of the end handle.
    pub end_length: f64,
    /// Length of the increase button.
    pub increase_length: f64,
    /// Value units per pixel; zero when the track has no room.
    pub density: f64,
    /// Axis the geometry was computed for.
    pub orientation: Orientation,
    /// Whether the start and end sides are swapped.
    pub is_direction_reversed: bool,
}

/// Position of one part along the track axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPlacement {
    /// Which part is placed.
    pub part: TrackPart,
    /// Offset from the leading edge (left or top) of the track.
    pub offset: f64,
    /// Length along the axis.
    pub length: f64,
}

impl TrackPlacement {
    /// Offset of the trailing edge.
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }

    fn contains(&self, axis_offset: f64) -> bool {
        self.length > 0.0 && axis_offset >= self.offset && axis_offset <= self.end()
    }
}

fn ratio(interval: f64, density: f64) -> f64 {
    if density == 0.0 || !density.is_finite() {
        0.0
    } else {
        interval / density
    }
}

/// Computes the five segment lengths of a track.
///
/// `available_length` is the length of the track along its axis. The segment
/// lengths always sum to `available_length` when it is positive and finite,
/// and are all zero otherwise. When the handles alone do not fit they share
/// the length in proportion to their measured sizes and the three value
/// segments collapse to zero.
#[tracing::instrument(level = "trace", skip(snapshot, args))]
pub fn arrange(snapshot: &RangeSnapshot, args: &TrackArgs, available_length: f64) -> TrackGeometry {
    let mut geometry = TrackGeometry {
        orientation: args.orientation,
        is_direction_reversed: args.is_direction_reversed,
        ..TrackGeometry::default()
    };
    if !available_length.is_finite() || available_length <= 0.0 {
        return geometry;
    }

    let start_handle = clamp_length(args.start_handle_size, available_length);
    let end_handle = clamp_length(args.end_handle_size, available_length);
    let reserved = start_handle + end_handle;
    if greater_than(reserved, available_length) {
        let start_share = available_length * start_handle / reserved;
        geometry.start_length = start_share;
        geometry.end_length = available_length - start_share;
        return geometry;
    }
    geometry.start_length = start_handle;
    geometry.end_length = end_handle;

    let track_length = (available_length - reserved).max(0.0);
    let interval = snapshot.maximum - snapshot.minimum;
    let interval = if interval.is_finite() { interval.max(0.0) } else { 0.0 };
    let density = if track_length > 0.0 {
        interval / track_length
    } else {
        0.0
    };

    let decrease_interval = interval.min(snapshot.start - snapshot.minimum);
    let increase_interval = interval.min(snapshot.maximum - snapshot.end);

    geometry.density = density;
    geometry.decrease_length = clamp_length(ratio(decrease_interval, density), track_length);
    geometry.increase_length = clamp_length(ratio(increase_interval, density), track_length);
    geometry.range_length = clamp_length(
        track_length - geometry.decrease_length - geometry.increase_length,
        track_length,
    );
    geometry
}

/// Converts a pointer drag into a value delta.
///
/// Vertical drags are negated because pixel rows grow downward while values
/// grow upward.
pub fn value_from_distance(dx: f64, dy: f64, density: f64, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Horizontal => dx * density,
        Orientation::Vertical => -dy * density,
    }
}

impl TrackGeometry {
    /// Length of one part.
    pub fn length_of(&self, part: TrackPart) -> f64 {
        match part {
            TrackPart::DecreaseButton => self.decrease_length,
            TrackPart::StartHandle => self.start_length,
            TrackPart::RangeHandle => self.range_length,
            TrackPart::EndHandle => self.end_length,
            TrackPart::IncreaseButton => self.increase_length,
        }
    }

    /// Sum of all five segments.
    pub fn total_length(&self) -> f64 {
        LOGICAL_ORDER.iter().map(|part| self.length_of(*part)).sum()
    }

    /// Parts from the leading edge (left or top) to the trailing edge.
    pub fn visual_order(&self) -> [TrackPart; 5] {
        let mut order = LOGICAL_ORDER;
        let forward = (self.orientation == Orientation::Horizontal) != self.is_direction_reversed;
        if !forward {
            order.reverse();
        }
        order
    }

    /// Placements in arrange order.
    ///
    /// Siblings come in visual order and the range handle is always last, so
    /// it sits on top of anything it touches.
    pub fn placements(&self) -> [TrackPlacement; 5] {
        let mut placements = [TrackPlacement {
            part: TrackPart::RangeHandle,
            offset: 0.0,
            length: 0.0,
        }; 5];

        let mut offset = 0.0;
        let mut next = 0;
        for part in self.visual_order() {
            let length = self.length_of(part);
            let placement = TrackPlacement {
                part,
                offset,
                length,
            };
            offset += length;
            if part == TrackPart::RangeHandle {
                placements[4] = placement;
            } else {
                placements[next] = placement;
                next += 1;
            }
        }
        placements
    }

    /// Placement of a single part.
    pub fn placement_of(&self, part: TrackPart) -> TrackPlacement {
        self.placements()
            .into_iter()
            .find(|placement| placement.part == part)
            .unwrap_or(TrackPlacement {
                part,
                offset: 0.0,
                length: 0.0,
            })
    }

    /// Projects a point onto the track axis.
    pub fn axis_offset(&self, x: f64, y: f64) -> f64 {
        match self.orientation {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }

    /// Finds the part under `axis_offset`.
    ///
    /// Parts are tested in reverse arrange order, so on a shared edge the
    /// range handle wins over its siblings. Zero-length parts are never hit.
    pub fn hit_test(&self, axis_offset: f64) -> Option<TrackPart> {
        self.placements()
            .iter()
            .rev()
            .find(|placement| placement.contains(axis_offset))
            .map(|placement| placement.part)
    }

    /// Converts a pointer drag into a value delta, honouring direction
    /// reversal.
    pub fn value_from_distance(&self, dx: f64, dy: f64) -> f64 {
        let delta = value_from_distance(dx, dy, self.density, self.orientation);
        if self.is_direction_reversed {
            -delta
        } else {
            delta
        }
    }
}
