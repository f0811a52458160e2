use crate::{EdgePlacement, RubberBand};

const WIDTH: f32 = 300.0;

#[test]
fn left_drag_below_open_line_is_linear() {
    let band = RubberBand::default();
    let closed = EdgePlacement::Left.closed_offset(WIDTH);
    assert_eq!(closed, -601.0);
    assert_eq!(band.resist(120.0, closed, EdgePlacement::Left, WIDTH), -481.0);
}

#[test]
fn left_overshoot_is_quartered() {
    let band = RubberBand::default();
    let closed = EdgePlacement::Left.closed_offset(WIDTH);
    // Linear position -201 is 99 past the open line at -300.
    assert_eq!(
        band.resist(400.0, closed, EdgePlacement::Left, WIDTH),
        -300.0 + 99.0 / 4.0
    );
}

#[test]
fn left_is_continuous_at_the_open_line() {
    let band = RubberBand::default();
    let closed = EdgePlacement::Left.closed_offset(WIDTH);
    let below = band.resist(300.999, closed, EdgePlacement::Left, WIDTH);
    let at = band.resist(301.0, closed, EdgePlacement::Left, WIDTH);
    let above = band.resist(301.001, closed, EdgePlacement::Left, WIDTH);
    assert!((at - below).abs() < 0.01);
    assert!((above - at).abs() < 0.01);
    assert_eq!(at, -300.0);
}

#[test]
fn left_resistance_is_monotonic() {
    let band = RubberBand::default();
    for initial in [-601.0, -450.0, -300.0] {
        let mut previous = f32::NEG_INFINITY;
        for step in 0..=2_000 {
            let delta = step as f32 * 0.75;
            let offset = band.resist(delta, initial, EdgePlacement::Left, WIDTH);
            assert!(
                offset >= previous,
                "offset went back from {previous} to {offset} at delta {delta}"
            );
            previous = offset;
        }
    }
}

#[test]
fn right_resistance_is_monotonic_toward_negative() {
    let band = RubberBand::default();
    for initial in [0.0, -150.0, -300.0] {
        let mut previous = f32::INFINITY;
        for step in 0..=2_000 {
            let delta = -(step as f32) * 0.75;
            let offset = band.resist(delta, initial, EdgePlacement::Right, WIDTH);
            assert!(offset <= previous);
            previous = offset;
        }
    }
}

#[test]
fn right_mirrors_left() {
    let band = RubberBand::default();
    assert_eq!(band.resist(-120.0, 0.0, EdgePlacement::Right, WIDTH), -120.0);
    assert_eq!(
        band.resist(-400.0, 0.0, EdgePlacement::Right, WIDTH),
        -300.0 - 100.0 / 4.0
    );
}

#[test]
fn offsets_stay_within_bounds_for_any_delta() {
    let band = RubberBand::default();
    let limit = 2.0 * WIDTH + 1.0;
    for placement in [EdgePlacement::Left, EdgePlacement::Right] {
        let (min, max) = placement.offset_bounds(WIDTH);
        for initial in [
            placement.closed_offset(WIDTH),
            placement.open_offset(WIDTH),
        ] {
            for delta in [-1.0e6, -5_000.0, -601.0, -1.0, 0.0, 1.0, 601.0, 5_000.0, 1.0e6] {
                let offset = band.resist(delta, initial, placement, WIDTH);
                assert!(offset >= min && offset <= max, "{placement:?} {delta} -> {offset}");
                assert!(offset.abs() <= limit);
            }
        }
    }
}

#[test]
fn dragging_toward_closed_from_open_is_linear() {
    let band = RubberBand::default();
    assert_eq!(band.resist(-50.0, -300.0, EdgePlacement::Left, WIDTH), -350.0);
    assert_eq!(band.resist(50.0, -300.0, EdgePlacement::Right, WIDTH), -250.0);
}
