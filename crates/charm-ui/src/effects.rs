//! Parent content effects derived from the panel offset.
//!
//! Both effects are affine in the distance the panel has travelled from its
//! closed edge and are held inside their `[open, closed]` range, so rubber
//! band overshoot can never push the parent content out of bounds.

use crate::config::CharmConfig;
use crate::error::CharmError;
use crate::model::PanelGeometry;

/// One-way mapping from a panel offset to a derived visual value.
pub trait OffsetConverter {
    fn convert(&self, offset: f32) -> f32;

    /// Derived values have no meaningful inverse.
    fn convert_back(&self, _value: f32) -> Result<f32, CharmError> {
        Err(CharmError::UnsupportedOperation {
            operation: "convert_back",
        })
    }
}

/// Dimming opacity of the parent content.
///
/// Left: `1 - (w + (offset + w)) / w * 0.4`, right: `1 + offset / w * 0.4`
/// with the default range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityConverter {
    geometry: PanelGeometry,
    open_opacity: f32,
    closed_opacity: f32,
}

impl OpacityConverter {
    pub fn new(geometry: PanelGeometry, config: &CharmConfig) -> Self {
        Self {
            geometry,
            open_opacity: config.open_opacity,
            closed_opacity: config.closed_opacity,
        }
    }
}

impl OffsetConverter for OpacityConverter {
    fn convert(&self, offset: f32) -> f32 {
        let fraction = self.geometry.travel(offset) / self.geometry.width;
        let opacity = self.closed_opacity - fraction * (self.closed_opacity - self.open_opacity);
        opacity.clamp(self.open_opacity, self.closed_opacity)
    }
}

/// Depth scale of the parent content.
///
/// The parent is pushed back by an emulated depth of up to `max_depth`
/// units, which is projected to a uniform scale of `1 + z / depth_divisor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthConverter {
    geometry: PanelGeometry,
    max_depth: f32,
    depth_divisor: f32,
}

impl DepthConverter {
    pub fn new(geometry: PanelGeometry, config: &CharmConfig) -> Self {
        Self {
            geometry,
            max_depth: config.max_depth,
            depth_divisor: config.depth_divisor,
        }
    }

    /// Emulated z position of the parent content, `0` closed and
    /// `-max_depth` open.
    pub fn depth_at(&self, offset: f32) -> f32 {
        let fraction = (self.geometry.travel(offset) / self.geometry.width).min(1.0);
        -self.max_depth * fraction
    }
}

impl OffsetConverter for DepthConverter {
    fn convert(&self, offset: f32) -> f32 {
        let scale = 1.0 + self.depth_at(offset) / self.depth_divisor;
        scale.clamp(1.0 - self.max_depth / self.depth_divisor, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedEffects {
    pub opacity: f32,
    pub depth_scale: f32,
}

impl DerivedEffects {
    pub fn at_offset(geometry: PanelGeometry, config: &CharmConfig, offset: f32) -> Self {
        Self {
            opacity: OpacityConverter::new(geometry, config).convert(offset),
            depth_scale: DepthConverter::new(geometry, config).convert(offset),
        }
    }
}
