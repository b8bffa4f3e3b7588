use rangekit_ui::{
    RangeError, RangeModel, RangeProperty, RangeScalar,
    track::{TrackGeometry, TrackPart},
};
use tracing::{debug, trace};

use super::{BoundTrack, FocusedThumb, RangeSliderArgs, StepCommand};

/// Pointer position relative to the track's leading corner, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl PointerPosition {
    /// Creates a pointer position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Part being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The start handle.
    Start,
    /// The end handle.
    End,
    /// The range handle between them; moves both endpoints.
    Range,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    target: DragTarget,
    origin: PointerPosition,
    origin_start: f64,
    origin_end: f64,
    geometry: TrackGeometry,
}

/// Controller for a range slider.
///
/// Translates presses, drags and steps into writes on a [`RangeModel`]. Every
/// write goes through the model's setters, so the model's coercion has the
/// last word; the controller only rebinds its track afterwards.
#[derive(Debug, Clone)]
pub struct RangeSliderController {
    args: RangeSliderArgs,
    track: BoundTrack,
    drag: Option<DragState>,
    focused: FocusedThumb,
}

impl Default for RangeSliderController {
    fn default() -> Self {
        Self::new(RangeSliderArgs::default())
    }
}

impl RangeSliderController {
    /// Creates a controller with its own track.
    pub fn new(args: RangeSliderArgs) -> Self {
        Self {
            track: BoundTrack::new(args.track),
            args,
            drag: None,
            focused: FocusedThumb::default(),
        }
    }

    /// Arguments in use.
    pub fn args(&self) -> &RangeSliderArgs {
        &self.args
    }

    /// Replaces the arguments. Disabling the slider cancels any drag.
    pub fn set_args(&mut self, args: RangeSliderArgs) {
        if args.disabled {
            self.drag = None;
        }
        self.track.set_args(args.track);
        self.args = args;
    }

    /// The bound track.
    pub fn track(&self) -> &BoundTrack {
        &self.track
    }

    /// Binds the track to `model` and lays it out.
    pub fn layout<T: RangeScalar, I: RangeScalar>(
        &mut self,
        model: &RangeModel<T, I>,
        available_length: f64,
    ) -> &TrackGeometry {
        self.track.bind(model);
        self.track.arrange(available_length)
    }

    /// Thumb that receives steps.
    pub fn focused_thumb(&self) -> FocusedThumb {
        self.focused
    }

    /// Moves keyboard focus to `thumb`.
    pub fn set_focused_thumb(&mut self, thumb: FocusedThumb) {
        self.focused = thumb;
    }

    /// Part being dragged, if any.
    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag.map(|drag| drag.target)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handles a pointer press.
    ///
    /// Pressing a handle starts a drag. Pressing the decrease (increase)
    /// region pages the start (end) value down (up) by `LargeChange`. Returns
    /// whether the press hit the slider.
    pub fn press<T: RangeScalar, I: RangeScalar>(
        &mut self,
        model: &mut RangeModel<T, I>,
        position: PointerPosition,
    ) -> Result<bool, RangeError> {
        if self.args.disabled {
            return Ok(false);
        }

        let geometry = *self.track.geometry();
        let Some(part) = geometry.hit_test(geometry.axis_offset(position.x, position.y)) else {
            return Ok(false);
        };
        trace!(?part, "range slider pressed");

        let target = match part {
            TrackPart::StartHandle => DragTarget::Start,
            TrackPart::EndHandle => DragTarget::End,
            TrackPart::RangeHandle => DragTarget::Range,
            TrackPart::DecreaseButton => {
                self.focused = FocusedThumb::Start;
                let value = model.start_value().to_f64() - model.large_change().to_f64();
                self.write(model, FocusedThumb::Start, value)?;
                return Ok(true);
            }
            TrackPart::IncreaseButton => {
                self.focused = FocusedThumb::End;
                let value = model.end_value().to_f64() + model.large_change().to_f64();
                self.write(model, FocusedThumb::End, value)?;
                return Ok(true);
            }
        };

        match target {
            DragTarget::Start => self.focused = FocusedThumb::Start,
            DragTarget::End => self.focused = FocusedThumb::End,
            DragTarget::Range => {}
        }
        self.drag = Some(DragState {
            target,
            origin: position,
            origin_start: model.start_value().to_f64(),
            origin_end: model.end_value().to_f64(),
            geometry,
        });
        Ok(true)
    }

    /// Handles pointer movement during a drag.
    ///
    /// The delta is measured from the press position and converted with the
    /// geometry captured at the press, so the drag does not drift while the
    /// track relayouts underneath it. Returns whether a drag was active.
    pub fn drag_to<T: RangeScalar, I: RangeScalar>(
        &mut self,
        model: &mut RangeModel<T, I>,
        position: PointerPosition,
    ) -> Result<bool, RangeError> {
        if self.args.disabled {
            return Ok(false);
        }
        let Some(drag) = self.drag else {
            return Ok(false);
        };

        let delta = drag
            .geometry
            .value_from_distance(position.x - drag.origin.x, position.y - drag.origin.y);

        match drag.target {
            DragTarget::Start => {
                self.write(model, FocusedThumb::Start, drag.origin_start + delta)?;
            }
            DragTarget::End => {
                self.write(model, FocusedThumb::End, drag.origin_end + delta)?;
            }
            DragTarget::Range => {
                // Keep the width: stop at whichever bound the interval meets
                // first.
                let lowest = model.minimum().to_f64() - drag.origin_start;
                let highest = model.maximum().to_f64() - drag.origin_end;
                let delta = delta.min(highest).max(lowest);
                let start = from_f64::<T>(RangeProperty::StartValue, drag.origin_start + delta)?;
                let end = from_f64::<T>(RangeProperty::EndValue, drag.origin_end + delta)?;
                model.set_range(start, end)?;
                self.track.bind(model);
            }
        }
        Ok(true)
    }

    /// Ends the current drag. Returns whether one was active.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Applies a step to the focused thumb.
    pub fn step<T: RangeScalar, I: RangeScalar>(
        &mut self,
        model: &mut RangeModel<T, I>,
        command: StepCommand,
    ) -> Result<bool, RangeError> {
        if self.args.disabled {
            return Ok(false);
        }

        let current = match self.focused {
            FocusedThumb::Start => model.start_value().to_f64(),
            FocusedThumb::End => model.end_value().to_f64(),
        };
        let value = match command {
            StepCommand::SmallDecrement => current - model.small_change().to_f64(),
            StepCommand::SmallIncrement => current + model.small_change().to_f64(),
            StepCommand::LargeDecrement => current - model.large_change().to_f64(),
            StepCommand::LargeIncrement => current + model.large_change().to_f64(),
            StepCommand::ToMinimum => model.minimum().to_f64(),
            StepCommand::ToMaximum => model.maximum().to_f64(),
        };
        trace!(?command, thumb = ?self.focused, value, "range slider step");
        self.write(model, self.focused, value)?;
        Ok(true)
    }

    fn write<T: RangeScalar, I: RangeScalar>(
        &mut self,
        model: &mut RangeModel<T, I>,
        thumb: FocusedThumb,
        value: f64,
    ) -> Result<(), RangeError> {
        match thumb {
            FocusedThumb::Start => {
                model.set_start_value(from_f64(RangeProperty::StartValue, value)?)?;
            }
            FocusedThumb::End => {
                model.set_end_value(from_f64(RangeProperty::EndValue, value)?)?;
            }
        }
        self.track.bind(model);
        Ok(())
    }
}

fn from_f64<T: RangeScalar>(property: RangeProperty, value: f64) -> Result<T, RangeError> {
    T::from_f64(value).ok_or_else(|| {
        debug!(%property, value, "slider produced a value the model cannot hold");
        RangeError::Unrepresentable { property, value }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rangekit_ui::{
        NumericRangeModel, RangeChange, RangeModelArgs,
        track::{Orientation, TrackArgs},
    };

    use super::*;

    fn model(min_range: f64) -> NumericRangeModel {
        NumericRangeModel::from_args(
            RangeModelArgs::new(0.0, 10.0)
                .start_value(2.0)
                .end_value(8.0)
                .min_range_value(min_range),
        )
        .unwrap()
    }

    fn slider(model: &NumericRangeModel, track: TrackArgs) -> RangeSliderController {
        let mut slider = RangeSliderController::new(RangeSliderArgs::default().track(track));
        slider.layout(model, 110.0);
        slider
    }

    fn handles() -> TrackArgs {
        TrackArgs::default()
            .start_handle_size(10.0)
            .end_handle_size(10.0)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn dragging_the_start_handle() {
        let mut model = model(0.0);
        let mut slider = slider(&model, handles());

        assert!(slider.press(&mut model, PointerPosition::new(20.0, 5.0)).unwrap());
        assert_eq!(slider.drag_target(), Some(DragTarget::Start));
        assert_eq!(slider.focused_thumb(), FocusedThumb::Start);

        slider.drag_to(&mut model, PointerPosition::new(38.0, 40.0)).unwrap();
        assert!(close(model.start_value(), 4.0));
        assert!(close(slider.track().start_value(), 4.0));

        // Far past the end: the model clamps at the end value.
        slider.drag_to(&mut model, PointerPosition::new(200.0, 0.0)).unwrap();
        assert_eq!(model.start_value(), 8.0);

        assert!(slider.release());
        assert!(!slider.release());
        assert!(!slider.drag_to(&mut model, PointerPosition::new(0.0, 0.0)).unwrap());
    }

    #[test]
    fn dragging_the_end_handle_respects_min_range() {
        let mut model = model(3.0);
        let mut slider = slider(&model, handles());

        // End handle sits at 82..92.
        assert!(slider.press(&mut model, PointerPosition::new(85.0, 0.0)).unwrap());
        assert_eq!(slider.drag_target(), Some(DragTarget::End));

        slider.drag_to(&mut model, PointerPosition::new(40.0, 0.0)).unwrap();
        assert_eq!(model.end_value(), 5.0);
    }

    #[test]
    fn dragging_the_range_keeps_the_width() {
        let mut model = model(0.0);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        model.subscribe(move |change: RangeChange<f64, f64>| {
            if let RangeChange::Value(interval) = change {
                sink.lock().push(interval);
            }
        });
        let mut slider = slider(&model, handles());

        assert!(slider.press(&mut model, PointerPosition::new(50.0, 0.0)).unwrap());
        assert_eq!(slider.drag_target(), Some(DragTarget::Range));

        slider.drag_to(&mut model, PointerPosition::new(59.0, 0.0)).unwrap();
        assert!(close(model.start_value(), 3.0));
        assert!(close(model.end_value(), 9.0));

        // Clamped at the maximum without shrinking.
        slider.drag_to(&mut model, PointerPosition::new(500.0, 0.0)).unwrap();
        assert_eq!((model.start_value(), model.end_value()), (4.0, 10.0));

        slider.drag_to(&mut model, PointerPosition::new(-500.0, 0.0)).unwrap();
        assert_eq!((model.start_value(), model.end_value()), (0.0, 6.0));

        assert_eq!(events.lock().len(), 3);
    }

    #[test]
    fn pressing_the_buttons_pages_by_large_change() {
        let mut model = model(0.0);
        let mut slider = slider(&model, handles());

        assert!(slider.press(&mut model, PointerPosition::new(5.0, 0.0)).unwrap());
        assert_eq!(model.start_value(), 1.0);
        assert!(!slider.is_dragging());

        assert!(slider.press(&mut model, PointerPosition::new(105.0, 0.0)).unwrap());
        assert_eq!(model.end_value(), 9.0);
        assert_eq!(slider.focused_thumb(), FocusedThumb::End);

        assert!(!slider.press(&mut model, PointerPosition::new(200.0, 0.0)).unwrap());
    }

    #[test]
    fn vertical_drags_grow_upward() {
        let mut model = model(0.0);
        let mut slider = slider(&model, handles().orientation(Orientation::Vertical));

        // Top to bottom: increase 0..18, end 18..28, range, start 82..92.
        assert!(slider.press(&mut model, PointerPosition::new(0.0, 85.0)).unwrap());
        assert_eq!(slider.drag_target(), Some(DragTarget::Start));

        slider.drag_to(&mut model, PointerPosition::new(0.0, 76.0)).unwrap();
        assert!(close(model.start_value(), 3.0));
    }

    #[test]
    fn steps_move_the_focused_thumb() {
        let mut model = model(0.0);
        let mut slider = slider(&model, handles());

        slider.step(&mut model, StepCommand::SmallIncrement).unwrap();
        assert!(close(model.start_value(), 2.1));
        slider.step(&mut model, StepCommand::ToMinimum).unwrap();
        assert_eq!(model.start_value(), 0.0);

        slider.set_focused_thumb(FocusedThumb::End);
        slider.step(&mut model, StepCommand::LargeDecrement).unwrap();
        assert_eq!(model.end_value(), 7.0);
        slider.step(&mut model, StepCommand::ToMaximum).unwrap();
        assert_eq!(model.end_value(), 10.0);
    }

    #[test]
    fn disabled_slider_ignores_input() {
        let mut model = model(0.0);
        let mut slider = slider(&model, handles());
        slider.press(&mut model, PointerPosition::new(20.0, 0.0)).unwrap();

        slider.set_args(RangeSliderArgs::default().track(handles()).disabled(true));
        assert!(!slider.is_dragging());
        assert!(!slider.press(&mut model, PointerPosition::new(5.0, 0.0)).unwrap());
        assert!(!slider.step(&mut model, StepCommand::ToMaximum).unwrap());
        assert_eq!((model.start_value(), model.end_value()), (2.0, 8.0));
    }

    #[test]
    fn calendar_models_page_by_large_change() {
        use chrono::{DateTime, TimeDelta, Utc};
        use rangekit_ui::CalendarRangeModel;

        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let mut model = CalendarRangeModel::from_args(RangeModelArgs::new(
            epoch,
            epoch + TimeDelta::days(9),
        ))
        .unwrap();
        let mut slider = RangeSliderController::default();
        slider.layout(&model, 90.0);

        // No handles: the range handle covers the whole track.
        assert!(slider.press(&mut model, PointerPosition::new(45.0, 0.0)).unwrap());
        slider.release();
        slider.set_focused_thumb(FocusedThumb::End);
        slider.step(&mut model, StepCommand::LargeDecrement).unwrap();

        let paged = TimeDelta::hours(21) + TimeDelta::minutes(36);
        assert_eq!(model.end_value(), epoch + TimeDelta::days(9) - paged);
    }
}
