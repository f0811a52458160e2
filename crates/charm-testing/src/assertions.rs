//! Assertion helpers for panel state.

use charm_ui_graphics::GraphicsLayer;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that two render transforms are approximately equal.
pub fn assert_layer_approx_eq(
    actual: GraphicsLayer,
    expected: GraphicsLayer,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(actual.alpha, expected.alpha, tolerance, &format!("{} - alpha", msg));
    assert_approx_eq(
        actual.scale_x,
        expected.scale_x,
        tolerance,
        &format!("{} - scale_x", msg),
    );
    assert_approx_eq(
        actual.scale_y,
        expected.scale_y,
        tolerance,
        &format!("{} - scale_y", msg),
    );
    assert_approx_eq(
        actual.translation_x,
        expected.translation_x,
        tolerance,
        &format!("{} - translation_x", msg),
    );
    assert_approx_eq(
        actual.translation_y,
        expected.translation_y,
        tolerance,
        &format!("{} - translation_y", msg),
    );
}
