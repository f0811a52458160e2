use super::*;

use charm_core::Runtime;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

fn settle_spec(duration_millis: u64) -> AnimationSpec {
    AnimationSpec::tween(duration_millis, Easing::CircEaseOut)
}

fn drive(runtime: &Runtime, mut frame_time: u64, max_frames: usize) -> u64 {
    for _ in 0..max_frames {
        if !runtime.has_frame_callbacks() {
            break;
        }
        runtime.drain_frame_callbacks(frame_time);
        frame_time += FRAME_NANOS;
    }
    frame_time
}

#[test]
fn storyboard_interpolates_every_track_over_time() {
    let runtime = Runtime::headless();
    let offset = Rc::new(RefCell::new(Vec::new()));
    let opacity = Rc::new(Cell::new(1.0f32));

    let handle = {
        let offset = Rc::clone(&offset);
        let opacity = Rc::clone(&opacity);
        Storyboard::new(settle_spec(200))
            .animate("offset", -601.0, -300.0, move |value| {
                offset.borrow_mut().push(value)
            })
            .animate("opacity", 1.0, 0.6, move |value| opacity.set(value))
            .begin(&runtime.frame_clock())
    };

    drive(&runtime, 0, 32);

    let samples = offset.borrow();
    assert_eq!(samples.first().copied(), Some(-601.0));
    assert_eq!(samples.last().copied(), Some(-300.0));
    assert!(
        samples.iter().any(|value| *value > -601.0 && *value < -300.0),
        "storyboard should report intermediate values"
    );
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(opacity.get(), 0.6);
    assert_eq!(handle.state(), RunState::Completed);
    assert_eq!(handle.progress(), 1.0);
}

#[test]
fn completion_fires_once_and_only_after_duration() {
    let runtime = Runtime::headless();
    let completed_at = Rc::new(RefCell::new(Vec::new()));
    let last_frame = Rc::new(Cell::new(0u64));

    let _handle = {
        let completed_at = Rc::clone(&completed_at);
        let last_frame = Rc::clone(&last_frame);
        Storyboard::new(settle_spec(200))
            .animate("value", 0.0, 1.0, move |_| {})
            .on_completed(move || completed_at.borrow_mut().push(last_frame.get()))
            .set_at_end(move || {})
            .begin(&runtime.frame_clock())
    };

    let mut time = 1_000_000_000u64;
    for _ in 0..40 {
        if !runtime.has_frame_callbacks() {
            break;
        }
        last_frame.set(time);
        runtime.drain_frame_callbacks(time);
        time += FRAME_NANOS;
    }

    let completed_at = completed_at.borrow();
    assert_eq!(completed_at.len(), 1);
    assert!(completed_at[0] - 1_000_000_000 >= 200_000_000);
}

#[test]
fn end_actions_run_before_completion_callbacks() {
    let runtime = Runtime::headless();
    let order = Rc::new(RefCell::new(Vec::new()));

    let _handle = {
        let at_end = Rc::clone(&order);
        let done = Rc::clone(&order);
        Storyboard::new(settle_spec(50))
            .animate("value", 0.0, 1.0, |_| {})
            .on_completed(move || done.borrow_mut().push("completed"))
            .set_at_end(move || at_end.borrow_mut().push("hidden"))
            .begin(&runtime.frame_clock())
    };

    drive(&runtime, 0, 10);
    assert_eq!(order.borrow().as_slice(), &["hidden", "completed"]);
}

#[test]
fn stopped_storyboard_keeps_live_value_and_never_completes() {
    let runtime = Runtime::headless();
    let value = Rc::new(Cell::new(0.0f32));
    let completed = Rc::new(Cell::new(false));

    let handle = {
        let value = Rc::clone(&value);
        let completed = Rc::clone(&completed);
        Storyboard::new(settle_spec(200))
            .animate("value", 0.0, 100.0, move |v| value.set(v))
            .on_completed(move || completed.set(true))
            .begin(&runtime.frame_clock())
    };

    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(100_000_000);
    let mid = value.get();
    assert!((mid - 86.602_54).abs() < 0.01);

    handle.stop();
    assert_eq!(handle.state(), RunState::Stopped);
    drive(&runtime, 200_000_000, 10);

    assert_eq!(value.get(), mid);
    assert!(!completed.get());
}

#[test]
fn superseding_storyboard_starts_from_live_value() {
    let runtime = Runtime::headless();
    let value = Rc::new(Cell::new(0.0f32));

    let first = {
        let value = Rc::clone(&value);
        Storyboard::new(settle_spec(200))
            .animate("value", 0.0, 100.0, move |v| value.set(v))
            .begin(&runtime.frame_clock())
    };
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(50_000_000);
    first.stop();

    let live = value.get();
    let second = {
        let value = Rc::clone(&value);
        Storyboard::new(settle_spec(200))
            .animate("value", live, 0.0, move |v| value.set(v))
            .begin(&runtime.frame_clock())
    };
    runtime.drain_frame_callbacks(60_000_000);
    assert_eq!(value.get(), live);

    drive(&runtime, 60_000_000 + FRAME_NANOS, 32);
    assert_eq!(value.get(), 0.0);
    assert_eq!(second.state(), RunState::Completed);
}

#[test]
fn dropping_the_last_handle_stops_the_storyboard() {
    let runtime = Runtime::headless();
    let frames = Rc::new(Cell::new(0));
    {
        let frames = Rc::clone(&frames);
        let handle = Storyboard::new(settle_spec(200))
            .animate("value", 0.0, 1.0, move |_| frames.set(frames.get() + 1))
            .begin(&runtime.frame_clock());
        drop(handle);
    }
    assert!(!runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(0);
    assert_eq!(frames.get(), 0);
}

#[test]
fn linear_progress_clamps_to_the_duration() {
    let spec = settle_spec(100);
    assert_eq!(spec.linear_progress(0), 0.0);
    assert_eq!(spec.linear_progress(50_000_000), 0.5);
    assert_eq!(spec.linear_progress(100_000_000), 1.0);
    assert_eq!(spec.linear_progress(500_000_000), 1.0);
}

#[test]
fn circ_ease_out_is_pinned_at_both_ends() {
    let easing = Easing::CircEaseOut;
    assert_eq!(easing.transform(-0.5), 0.0);
    assert_eq!(easing.transform(0.0), 0.0);
    assert_eq!(easing.transform(1.0), 1.0);
    assert_eq!(easing.transform(1.5), 1.0);
}

#[test]
fn circ_ease_out_decelerates() {
    let easing = Easing::CircEaseOut;
    let early = easing.transform(0.25) - easing.transform(0.0);
    let late = easing.transform(1.0) - easing.transform(0.75);
    assert!(early > late);
    assert!((easing.transform(0.5) - 0.866_025_4).abs() < 1e-5);
}

#[test]
fn lerp_reaches_both_ends() {
    assert_eq!(10.0f32.lerp(&20.0, 0.0), 10.0);
    assert_eq!(10.0f32.lerp(&20.0, 0.5), 15.0);
    assert_eq!(10.0f32.lerp(&20.0, 1.0), 20.0);
}
