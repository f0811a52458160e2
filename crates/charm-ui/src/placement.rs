use charm_ui_graphics::HorizontalAlignment;

/// Screen edge a charm is anchored to and slides out from.
///
/// The sliding surface is twice the panel width. Its horizontal offset is
/// `closed_offset` at rest and `open_offset` once fully revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgePlacement {
    #[default]
    Left,
    Right,
}

impl EdgePlacement {
    /// Resting offset of a closed panel. The left panel rests one unit past
    /// its nominal edge so no sliver of it shows.
    pub fn closed_offset(self, width: f32) -> f32 {
        match self {
            EdgePlacement::Left => -2.0 * width - 1.0,
            EdgePlacement::Right => 0.0,
        }
    }

    pub fn open_offset(self, width: f32) -> f32 {
        -width
    }

    /// Inclusive `(min, max)` range the offset is clamped to while dragging.
    pub fn offset_bounds(self, width: f32) -> (f32, f32) {
        match self {
            EdgePlacement::Left => (-2.0 * width - 1.0, 0.0),
            EdgePlacement::Right => (-2.0 * width, 0.0),
        }
    }

    /// Distance travelled from the nominal closed edge toward open. Never
    /// negative; `width` at the open resting position.
    pub fn travel(self, offset: f32, width: f32) -> f32 {
        let travel = match self {
            EdgePlacement::Left => offset + 2.0 * width,
            EdgePlacement::Right => -offset,
        };
        travel.max(0.0)
    }

    /// Whether a horizontal pointer movement of `dx` pulls toward open.
    pub fn pulls_open(self, dx: f32) -> bool {
        match self {
            EdgePlacement::Left => dx > 0.0,
            EdgePlacement::Right => dx < 0.0,
        }
    }

    /// Panel content hugs the side facing the screen, away from the edge.
    pub fn content_alignment(self) -> HorizontalAlignment {
        match self {
            EdgePlacement::Left => HorizontalAlignment::Right,
            EdgePlacement::Right => HorizontalAlignment::Left,
        }
    }
}
