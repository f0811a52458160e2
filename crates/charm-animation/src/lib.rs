//! Animation system for the charm panel
//!
//! Provides time-based tweens with easing curves. A [`Storyboard`] runs a
//! set of tracks concurrently off one frame clock and reports completion
//! once every track has reached its target.

mod animation;
mod storyboard;

pub use animation::*;
pub use storyboard::*;

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
