use crate::MutableState;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn subscribers_see_changes_in_order() {
    let state = MutableState::new(0.0f32);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _subscription = {
        let seen = Rc::clone(&seen);
        state.subscribe(move |value| seen.borrow_mut().push(*value))
    };

    assert!(state.set(1.0));
    assert!(state.set(2.5));
    assert_eq!(seen.borrow().as_slice(), &[1.0, 2.5]);
}

#[test]
fn setting_an_equal_value_does_not_notify() {
    let state = MutableState::new(true);
    let count = Rc::new(RefCell::new(0));
    let _subscription = {
        let count = Rc::clone(&count);
        state.subscribe(move |_| *count.borrow_mut() += 1)
    };

    assert!(!state.set(true));
    assert!(state.set(false));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let state = MutableState::new(1u32);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let subscription = {
        let seen = Rc::clone(&seen);
        state.subscribe(move |value| seen.borrow_mut().push(*value))
    };
    state.set(2);

    drop(subscription);
    state.set(3);

    assert_eq!(seen.borrow().as_slice(), &[2]);
}

#[test]
fn observers_can_write_to_other_states() {
    let offset = MutableState::new(0.0f32);
    let derived = MutableState::new(1.0f32);

    let _binding = {
        let derived = derived.clone();
        offset.subscribe(move |value| {
            derived.set(1.0 + value / 800.0);
        })
    };

    offset.set(-80.0);
    assert!((derived.get() - 0.9).abs() < 1e-6);
}

#[test]
fn read_only_view_tracks_source() {
    let state = MutableState::new(3i32);
    let view = state.as_state();
    state.set(7);
    assert_eq!(view.get(), 7);
}
