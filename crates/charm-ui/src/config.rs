//! Tunable constants for the charm panel.

use charm_animation::{AnimationSpec, Easing};

use crate::error::CharmError;

/// Settle transition duration in milliseconds.
pub const TRANSITION_DURATION_MS: u64 = 200;

/// Parent content opacity while the panel is fully open.
pub const OPEN_OPACITY: f32 = 0.6;

/// Overshoot past the open line moves the panel this many times slower than
/// the pointer.
pub const DAMPING_DIVISOR: f32 = 4.0;

/// Emulated depth of the parent content when the panel is fully open.
pub const MAX_DEPTH: f32 = 64.0;

/// Perspective distance converting emulated depth to scale:
/// `scale = 1 + depth / DEPTH_DIVISOR`.
pub const DEPTH_DIVISOR: f32 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharmConfig {
    pub transition: AnimationSpec,
    pub open_opacity: f32,
    pub closed_opacity: f32,
    pub damping_divisor: f32,
    pub max_depth: f32,
    pub depth_divisor: f32,
}

impl CharmConfig {
    pub fn with_transition(mut self, transition: AnimationSpec) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_opacity_range(mut self, open_opacity: f32, closed_opacity: f32) -> Self {
        self.open_opacity = open_opacity;
        self.closed_opacity = closed_opacity;
        self
    }

    pub fn with_damping_divisor(mut self, damping_divisor: f32) -> Self {
        self.damping_divisor = damping_divisor;
        self
    }

    pub fn with_depth(mut self, max_depth: f32, depth_divisor: f32) -> Self {
        self.max_depth = max_depth;
        self.depth_divisor = depth_divisor;
        self
    }

    /// Parent content scale at the open resting position (0.92 by default).
    pub fn open_depth_scale(&self) -> f32 {
        1.0 - self.max_depth / self.depth_divisor
    }

    pub fn closed_depth_scale(&self) -> f32 {
        1.0
    }

    pub fn validate(&self) -> Result<(), CharmError> {
        let opacity_ok = |value: f32| (0.0..=1.0).contains(&value);
        if !opacity_ok(self.open_opacity) || !opacity_ok(self.closed_opacity) {
            return Err(CharmError::InvalidConfig {
                field: "opacity",
                reason: "must lie in [0, 1]",
            });
        }
        if self.open_opacity > self.closed_opacity {
            return Err(CharmError::InvalidConfig {
                field: "open_opacity",
                reason: "must not exceed closed_opacity",
            });
        }
        if !self.damping_divisor.is_finite() || self.damping_divisor < 1.0 {
            return Err(CharmError::InvalidConfig {
                field: "damping_divisor",
                reason: "must be finite and at least 1",
            });
        }
        if !self.depth_divisor.is_finite() || self.depth_divisor <= 0.0 {
            return Err(CharmError::InvalidConfig {
                field: "depth_divisor",
                reason: "must be finite and positive",
            });
        }
        if !self.max_depth.is_finite()
            || self.max_depth < 0.0
            || self.max_depth >= self.depth_divisor
        {
            return Err(CharmError::InvalidConfig {
                field: "max_depth",
                reason: "must lie in [0, depth_divisor)",
            });
        }
        Ok(())
    }
}

impl Default for CharmConfig {
    fn default() -> Self {
        Self {
            transition: AnimationSpec::tween(TRANSITION_DURATION_MS, Easing::CircEaseOut),
            open_opacity: OPEN_OPACITY,
            closed_opacity: 1.0,
            damping_divisor: DAMPING_DIVISOR,
            max_depth: MAX_DEPTH,
            depth_divisor: DEPTH_DIVISOR,
        }
    }
}
