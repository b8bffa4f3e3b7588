//! Tick placement along a range track.
//!
//! Only positions are computed here; drawing the marks is left to the host.
//! Offsets are measured from the leading edge (left or top) of the track, the
//! same origin [`TrackGeometry`](rangekit_ui::TrackGeometry) placements use.

use derive_setters::Setters;
use rangekit_ui::{
    RangeSnapshot,
    near_eq::{are_close, greater_than, less_than},
    track::Orientation,
};
use smallvec::SmallVec;
use tracing::warn;

const MAX_TICKS: usize = 10_000;

/// Arguments for [`tick_positions`].
#[derive(Debug, Clone, PartialEq, Default, Setters)]
pub struct TickBarArgs {
    /// Spacing of generated ticks in value units. Ignored when `ticks` is not
    /// empty; no intermediate ticks are generated when it is not positive.
    pub tick_frequency: f64,
    /// Explicit tick values. Values outside the bounds are skipped.
    pub ticks: SmallVec<[f64; 8]>,
    /// Pixels kept free at the ends of the bar, split evenly between them.
    /// Usually the handle size, so ticks line up with handle centres.
    pub reserved_space: f64,
    /// Axis of the bar.
    pub orientation: Orientation,
    /// Swaps the minimum and maximum ends.
    pub is_direction_reversed: bool,
}

/// One tick mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Value the tick stands for.
    pub value: f64,
    /// Offset from the leading edge of the bar.
    pub offset: f64,
}

/// Computes tick positions for a bar `available_length` pixels long.
///
/// The minimum and maximum always get exactly one tick each, merged into one
/// when they coincide. Ticks come out in ascending value order.
pub fn tick_positions(
    snapshot: &RangeSnapshot,
    args: &TickBarArgs,
    available_length: f64,
) -> Vec<Tick> {
    if !available_length.is_finite() || available_length <= 0.0 {
        return Vec::new();
    }
    let (minimum, maximum) = (snapshot.minimum, snapshot.maximum);
    if !minimum.is_finite() || !maximum.is_finite() {
        return Vec::new();
    }

    let reserved = if args.reserved_space.is_finite() {
        args.reserved_space.clamp(0.0, available_length)
    } else {
        0.0
    };
    let leading = reserved / 2.0;
    let track_length = available_length - reserved;
    let interval = (maximum - minimum).max(0.0);
    let forward = (args.orientation == Orientation::Horizontal) != args.is_direction_reversed;

    let offset_of = |value: f64| {
        let position = if interval > 0.0 {
            (value - minimum) / interval * track_length
        } else {
            0.0
        };
        if forward {
            leading + position
        } else {
            leading + track_length - position
        }
    };

    let mut values = vec![minimum];
    if !args.ticks.is_empty() {
        let mut explicit: Vec<f64> = args
            .ticks
            .iter()
            .copied()
            .filter(|tick| greater_than(*tick, minimum) && less_than(*tick, maximum))
            .collect();
        explicit.sort_by(f64::total_cmp);
        explicit.dedup_by(|a, b| are_close(*a, *b));
        values.extend(explicit);
    } else if args.tick_frequency > 0.0 && args.tick_frequency.is_finite() {
        for index in 1.. {
            let value = minimum + args.tick_frequency * index as f64;
            // A generated tick sitting on the maximum is the maximum tick.
            if !less_than(value, maximum) {
                break;
            }
            if values.len() >= MAX_TICKS {
                warn!(
                    frequency = args.tick_frequency,
                    interval, "tick frequency too fine; truncating ticks"
                );
                break;
            }
            values.push(value);
        }
    }
    if greater_than(maximum, minimum) {
        values.push(maximum);
    }

    values
        .into_iter()
        .map(|value| Tick {
            value,
            offset: offset_of(value),
        })
        .collect()
}
