//! Drag delta to panel offset mapping with resistance past the open line.

use crate::config::DAMPING_DIVISOR;
use crate::placement::EdgePlacement;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RubberBand {
    damping_divisor: f32,
}

impl RubberBand {
    pub fn new(damping_divisor: f32) -> Self {
        Self { damping_divisor }
    }

    /// Offset for a drag of `raw_delta` that started at `initial_offset`.
    ///
    /// Movement toward closed tracks the pointer. Movement toward open tracks
    /// the pointer up to the open line and is divided by the damping divisor
    /// beyond it. The result always lies within the placement's offset
    /// bounds.
    pub fn resist(
        &self,
        raw_delta: f32,
        initial_offset: f32,
        placement: EdgePlacement,
        width: f32,
    ) -> f32 {
        let linear = initial_offset + raw_delta;
        let open = placement.open_offset(width);
        let overshooting = match placement {
            EdgePlacement::Left => raw_delta >= 0.0 && linear >= open,
            EdgePlacement::Right => raw_delta <= 0.0 && linear <= open,
        };
        let offset = if overshooting {
            open + (linear - open) / self.damping_divisor
        } else {
            linear
        };
        let (min, max) = placement.offset_bounds(width);
        offset.clamp(min, max)
    }
}

impl Default for RubberBand {
    fn default() -> Self {
        Self::new(DAMPING_DIVISOR)
    }
}
