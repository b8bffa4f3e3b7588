use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use rangekit_components::{
    range_slider::{
        FocusedThumb, PointerPosition, RangeSliderArgs, RangeSliderController, StepCommand,
    },
    tick_bar::{TickBarArgs, tick_positions},
};
use rangekit_ui::{
    CalendarRangeModel, IntervalChange, NumericRangeModel, RangeChange, RangeModelArgs,
    track::{Orientation, TrackArgs, TrackPart},
};
use tracing::info;

const TRACK_LENGTH: f64 = 320.0;
const HANDLE_SIZE: f64 = 16.0;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            match tracing_subscriber::EnvFilter::try_new("error,rangekit_ui=info,example=info") {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            }
        }
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

fn handles() -> TrackArgs {
    TrackArgs::default()
        .start_handle_size(HANDLE_SIZE)
        .end_handle_size(HANDLE_SIZE)
}

fn numeric_demo() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = NumericRangeModel::from_args(
        RangeModelArgs::new(0.0, 100.0)
            .start_value(20.0)
            .end_value(30.0)
            .min_range_value(10.0),
    )?;

    let moves: Arc<Mutex<Vec<IntervalChange<f64>>>> = Arc::default();
    let sink = moves.clone();
    model.subscribe(move |change: RangeChange<f64, f64>| {
        if let RangeChange::Value(interval) = change {
            sink.lock().push(interval);
        }
    });

    let mut slider = RangeSliderController::new(RangeSliderArgs::default().track(handles()));
    let geometry = *slider.layout(&model, TRACK_LENGTH);
    info!(?geometry, "numeric slider laid out");

    // Grab the middle of the range handle and pull it right by 60 px.
    let range = geometry.placement_of(TrackPart::RangeHandle);
    let grab = PointerPosition::new(range.offset + range.length / 2.0, 0.0);
    slider.press(&mut model, grab)?;
    for step in 1..=6 {
        let pointer = PointerPosition::new(grab.x + 10.0 * f64::from(step), 0.0);
        slider.drag_to(&mut model, pointer)?;
    }
    slider.release();

    slider.set_focused_thumb(FocusedThumb::End);
    slider.step(&mut model, StepCommand::LargeIncrement)?;

    // Narrowing the bounds drags the interval along.
    model.set_maximum(40.0)?;
    info!(
        start = model.start_value(),
        end = model.end_value(),
        min_range = model.min_range_value(),
        "numeric model settled"
    );

    let ticks = tick_positions(
        &model.snapshot(),
        &TickBarArgs::default()
            .tick_frequency(10.0)
            .reserved_space(HANDLE_SIZE),
        TRACK_LENGTH,
    );
    let offsets: Vec<f64> = ticks.iter().map(|tick| tick.offset).collect();
    info!(?offsets, "tick offsets");

    info!(count = moves.lock().len(), "interval moves observed");
    Ok(())
}

fn calendar_demo() -> Result<(), Box<dyn std::error::Error>> {
    let first = DateTime::<Utc>::UNIX_EPOCH;
    let mut model = CalendarRangeModel::from_args(
        RangeModelArgs::new(first, first + TimeDelta::days(30))
            .start_value(first + TimeDelta::days(7))
            .end_value(first + TimeDelta::days(14))
            .min_range_value(TimeDelta::days(1)),
    )?;

    let mut slider = RangeSliderController::new(
        RangeSliderArgs::default().track(handles().orientation(Orientation::Vertical)),
    );
    let geometry = *slider.layout(&model, TRACK_LENGTH);

    // Vertical tracks grow upward: dragging the end handle up moves it later.
    let end = geometry.placement_of(TrackPart::EndHandle);
    let grab = PointerPosition::new(0.0, end.offset + end.length / 2.0);
    slider.press(&mut model, grab)?;
    slider.drag_to(&mut model, PointerPosition::new(0.0, grab.y - 48.0))?;
    slider.release();

    model.set_is_single_value(true);
    info!(
        start = %model.start_value(),
        end = %model.end_value(),
        range = %model.range_value(),
        "calendar model switched to a single value"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    numeric_demo()?;
    calendar_demo()?;
    Ok(())
}
