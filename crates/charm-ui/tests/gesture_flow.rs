use charm_testing::{assert_approx_eq, CharmTestRule};
use charm_ui::exclusivity;
use charm_ui::{EdgePlacement, GestureState, HostChrome, ParentContent, Visibility};

#[test]
fn drag_of_120_from_closed_left_follows_the_linear_region() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    assert!(rule.press(0.0));
    assert!(rule.move_to(120.0));

    assert_eq!(rule.offset(), -481.0);
    assert!(rule.charm.is_dragging());
    assert_approx_eq(
        rule.parent.opacity_writes().last().copied().unwrap_or(1.0),
        1.0 - 119.0 / 300.0 * 0.4,
        1e-5,
        "live dimming",
    );
}

#[test]
fn press_presents_the_surface_below_the_reserved_inset() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.press(0.0);

    let model = rule.charm.model();
    assert!(model.is_surface_visible());
    let layout = rule.charm.surface_layout().expect("template applied");
    assert_eq!(layout.padding.top, 32.0);
    assert_eq!(layout.translate_y, -32.0);
    assert_eq!(layout.size.width, 600.0);
    assert_eq!(rule.chrome.visibility(), Visibility::Collapsed);
    assert_eq!(rule.capture.captured(), Some(1));
    assert_eq!(rule.charm.gesture_state(), GestureState::PressedCapturing);
}

#[test]
fn tap_on_closed_panel_changes_nothing() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.press(40.0);
    rule.release(40.0);

    assert_eq!(rule.offset(), -601.0);
    assert!(!rule.charm.is_transitioning());
    assert!(!rule.driver.runtime().has_frame_callbacks());
    assert_eq!(
        rule.chrome.history(),
        vec![Visibility::Collapsed, Visibility::Visible]
    );
    assert_eq!(exclusivity::holder(), None);
    assert!(rule.parent.opacity_writes().is_empty());
    assert!(!rule.charm.model().is_surface_visible());
    assert_eq!(rule.capture.captured(), None);
}

#[test]
fn drag_past_halfway_and_release_settles_open() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.drag(0.0, 350.0, 7);

    assert_eq!(rule.charm.gesture_state(), GestureState::ReleasingOpen);
    assert_eq!(exclusivity::holder(), Some(rule.charm.id()));
    assert!(rule.charm.model().is_cover_visible());

    rule.settle();
    assert!(rule.charm.is_open());
    assert_eq!(rule.offset(), -300.0);
    assert_eq!(rule.charm.gesture_state(), GestureState::Idle);
    assert_eq!(rule.parent.opacity(), 0.6);
    assert_eq!(rule.parent.scale(), Some(rule.charm.config().open_depth_scale()));
    assert_eq!(exclusivity::holder(), Some(rule.charm.id()));
}

#[test]
fn backing_off_before_release_settles_closed_and_clears_exclusivity() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.press(0.0);
    rule.move_to(200.0);
    rule.move_to(160.0);
    rule.release(160.0);

    assert_eq!(rule.charm.gesture_state(), GestureState::ReleasingClosed);
    assert_eq!(exclusivity::holder(), None);
    assert_eq!(rule.chrome.visibility(), Visibility::Visible);

    rule.settle();
    assert_eq!(rule.offset(), -601.0);
    assert_eq!(rule.parent.opacity(), 1.0);
    assert_eq!(rule.parent.scale(), Some(1.0));
    assert!(!rule.charm.model().is_surface_visible());
    assert_eq!(exclusivity::holder(), None);
}

#[test]
fn right_edge_opens_when_dragged_left() {
    let rule = CharmTestRule::new(EdgePlacement::Right, 300.0);
    rule.drag(500.0, 100.0, 8);
    rule.settle();

    assert!(rule.charm.is_open());
    assert_eq!(rule.offset(), -300.0);
}

#[test]
fn overshoot_is_compressed_while_dragging() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.press(0.0);
    rule.move_to(400.0);
    assert_eq!(rule.offset(), -275.25);
    rule.move_to(5_000.0);
    assert_eq!(rule.offset(), 0.0);
    assert!(rule.parent.opacity() >= 0.6);
    assert!(rule.parent.scale().unwrap_or(1.0) >= 0.92);
}

#[test]
fn pointer_cancel_returns_to_the_state_held_at_press() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.drag(0.0, 350.0, 5);
    rule.settle();
    assert!(rule.charm.is_open());

    rule.press(250.0);
    rule.move_to(100.0);
    assert!(!rule.charm.is_open());
    assert!(rule.cancel());
    rule.settle();

    assert!(rule.charm.is_open());
    assert_eq!(rule.capture.captured(), None);
}

#[test]
fn cancel_of_a_closed_drag_clears_exclusivity() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.press(0.0);
    rule.move_to(220.0);
    rule.cancel();
    assert_eq!(exclusivity::holder(), None);
    rule.settle();
    assert_eq!(rule.offset(), -601.0);
}

#[test]
fn last_press_wins_the_exclusivity_slot() {
    let first = CharmTestRule::new(EdgePlacement::Left, 300.0);
    let second = CharmTestRule::new(EdgePlacement::Right, 300.0);

    first.press(0.0);
    assert_eq!(exclusivity::holder(), Some(first.charm.id()));
    second.press(500.0);
    assert_eq!(exclusivity::holder(), Some(second.charm.id()));

    // The displaced panel resolving closed leaves the new holder alone.
    first.move_to(-20.0);
    first.release(-20.0);
    assert_eq!(exclusivity::holder(), Some(second.charm.id()));
}

#[test]
fn press_during_a_transition_takes_over_the_offset() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.charm.open();
    rule.driver.advance_by_millis(60);
    assert!(rule.charm.is_transitioning());
    let live = rule.offset();

    rule.press(10.0);
    assert!(!rule.charm.is_transitioning());
    assert_eq!(rule.offset(), live);
    rule.move_to(30.0);
    assert_eq!(rule.offset(), live + 20.0);
}

#[test]
fn parent_without_scale_never_receives_scale_writes() {
    let rule = CharmTestRule::without_scale(EdgePlacement::Left, 300.0);
    rule.drag(0.0, 350.0, 5);
    rule.settle();
    rule.charm.close();
    rule.settle();

    assert!(rule.parent.scale_writes().is_empty());
    assert_eq!(rule.parent.opacity(), 1.0);
    assert_eq!(rule.offset(), -601.0);
}

#[test]
fn tap_while_closing_still_settles_closed() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.charm.open();
    rule.settle();
    rule.charm.close();
    rule.driver.advance_by_millis(60);
    assert!(!rule.charm.model().is_closed());

    rule.press(10.0);
    rule.release(10.0);
    assert_eq!(rule.charm.gesture_state(), GestureState::ReleasingClosed);
    assert!(rule.charm.is_transitioning());

    rule.settle();
    assert_eq!(rule.offset(), -601.0);
    assert_eq!(rule.parent.opacity(), 1.0);
    assert_eq!(rule.parent.scale(), Some(1.0));
    assert!(!rule.charm.model().is_surface_visible());
    assert_eq!(rule.charm.gesture_state(), GestureState::Idle);
    assert_eq!(exclusivity::holder(), None);
}

#[test]
fn tap_while_opening_still_settles_open() {
    let rule = CharmTestRule::new(EdgePlacement::Left, 300.0);
    rule.charm.open();
    rule.driver.advance_by_millis(60);

    rule.press(10.0);
    rule.release(10.0);
    assert_eq!(rule.charm.gesture_state(), GestureState::ReleasingOpen);

    rule.settle();
    assert!(rule.charm.is_open());
    assert_eq!(rule.parent.opacity(), 0.6);
    assert!(rule.charm.model().is_cover_visible());
    assert!(rule.charm.model().is_surface_visible());
}
