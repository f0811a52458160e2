//! Easing curves, interpolation and tween specifications.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing functions mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Circular ease-out: `sqrt(1 - (1 - t)^2)`. Decelerates hard near the
    /// end.
    #[default]
    CircEaseOut,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::CircEaseOut => circ_ease_out(fraction),
        }
    }
}

fn circ_ease_out(fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }
    let t = fraction - 1.0;
    (1.0 - t * t).sqrt()
}

/// Duration and easing of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Linear progress in `[0, 1]` after `elapsed_nanos`.
    pub fn linear_progress(&self, elapsed_nanos: u64) -> f32 {
        let duration_nanos = (self.duration_millis * 1_000_000).max(1);
        (elapsed_nanos as f64 / duration_nanos as f64).clamp(0.0, 1.0) as f32
    }
}
