//! Core runtime services for the charm gesture engine.
//!
//! Everything here runs on one UI-affine thread: frame callbacks are drained
//! by the host in arrival order, idle tasks run once the host reports it has
//! nothing left to draw, and [`MutableState`] notifies its subscribers
//! synchronously.

mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, State, StateSubscription};

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;
