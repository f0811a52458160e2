//! Testing utilities for the charm panel.
//!
//! [`CharmTestRule`] owns a headless runtime driven by a virtual frame
//! clock, a charm with its template applied, and recording fakes for every
//! host collaborator.

mod assertions;
mod fakes;
mod frame_driver;
mod rule;

pub use assertions::{assert_approx_eq, assert_layer_approx_eq};
pub use fakes::{FakeChrome, FakeInsets, FakeParentContent, RecordingCapture};
pub use frame_driver::{FrameDriver, FRAME_NANOS};
pub use rule::CharmTestRule;
