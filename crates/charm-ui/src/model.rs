//! Single source of truth for the panel transform and its derived effects.
//!
//! Every attribute is a [`MutableState`]; hosts and parent content observe
//! them through subscriptions instead of being written to directly. While
//! `effects_follow_offset` is set (the default) every offset change
//! recomputes opacity and depth scale. Transitions switch it off and drive
//! all three properties themselves.

use std::cell::Cell;
use std::rc::Rc;

use charm_core::{MutableState, State, StateSubscription};
use charm_ui_graphics::{EdgeInsets, GraphicsLayer, HorizontalAlignment, Size};

use crate::config::CharmConfig;
use crate::effects::DerivedEffects;
use crate::error::{check_width, CharmError};
use crate::placement::EdgePlacement;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelGeometry {
    pub placement: EdgePlacement,
    pub width: f32,
}

impl PanelGeometry {
    pub fn new(placement: EdgePlacement, width: f32) -> Result<Self, CharmError> {
        Ok(Self {
            placement,
            width: check_width(width)?,
        })
    }

    pub fn closed_offset(&self) -> f32 {
        self.placement.closed_offset(self.width)
    }

    pub fn open_offset(&self) -> f32 {
        self.placement.open_offset(self.width)
    }

    pub fn resting_offset(&self, open: bool) -> f32 {
        if open {
            self.open_offset()
        } else {
            self.closed_offset()
        }
    }

    pub fn travel(&self, offset: f32) -> f32 {
        self.placement.travel(offset, self.width)
    }

    pub fn surface_width(&self) -> f32 {
        2.0 * self.width
    }
}

/// Layout of the sliding surface inside the host window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceLayout {
    pub size: Size,
    pub padding: EdgeInsets,
    pub translate_y: f32,
    pub content_alignment: HorizontalAlignment,
}

#[derive(Clone)]
pub struct TransformModel {
    config: CharmConfig,
    geometry: MutableState<PanelGeometry>,
    offset: MutableState<f32>,
    opacity: MutableState<f32>,
    depth_scale: MutableState<f32>,
    surface_visible: MutableState<bool>,
    cover_visible: MutableState<bool>,
    top_inset: MutableState<f32>,
    window_height: MutableState<f32>,
    effects_follow_offset: Rc<Cell<bool>>,
    _effects: Rc<StateSubscription>,
}

impl TransformModel {
    /// Model resting closed, effects at their closed values.
    pub fn new(geometry: PanelGeometry, config: CharmConfig) -> Self {
        let geometry = MutableState::new(geometry);
        let offset = MutableState::new(geometry.get().closed_offset());
        let opacity = MutableState::new(config.closed_opacity);
        let depth_scale = MutableState::new(config.closed_depth_scale());
        let effects_follow_offset = Rc::new(Cell::new(true));

        let effects = {
            let geometry = geometry.clone();
            let opacity = opacity.clone();
            let depth_scale = depth_scale.clone();
            let follow = Rc::clone(&effects_follow_offset);
            offset.subscribe(move |offset: &f32| {
                if !follow.get() {
                    return;
                }
                let effects = DerivedEffects::at_offset(geometry.get(), &config, *offset);
                opacity.set(effects.opacity);
                depth_scale.set(effects.depth_scale);
            })
        };

        Self {
            config,
            geometry,
            offset,
            opacity,
            depth_scale,
            surface_visible: MutableState::new(false),
            cover_visible: MutableState::new(false),
            top_inset: MutableState::new(0.0),
            window_height: MutableState::new(0.0),
            effects_follow_offset,
            _effects: Rc::new(effects),
        }
    }

    pub fn config(&self) -> &CharmConfig {
        &self.config
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry.get()
    }

    pub fn geometry_state(&self) -> State<PanelGeometry> {
        self.geometry.as_state()
    }

    /// Replace the geometry. Callers are expected to snap the offset after.
    pub fn set_geometry(&self, geometry: PanelGeometry) {
        self.geometry.set(geometry);
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn offset_state(&self) -> State<f32> {
        self.offset.as_state()
    }

    pub fn set_offset(&self, offset: f32) {
        self.offset.set(offset);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    pub fn opacity_state(&self) -> State<f32> {
        self.opacity.as_state()
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.opacity.set(opacity);
    }

    pub fn depth_scale(&self) -> f32 {
        self.depth_scale.get()
    }

    pub fn depth_scale_state(&self) -> State<f32> {
        self.depth_scale.as_state()
    }

    pub fn set_depth_scale(&self, scale: f32) {
        self.depth_scale.set(scale);
    }

    pub fn is_surface_visible(&self) -> bool {
        self.surface_visible.get()
    }

    pub fn surface_visible_state(&self) -> State<bool> {
        self.surface_visible.as_state()
    }

    pub fn set_surface_visible(&self, visible: bool) {
        self.surface_visible.set(visible);
    }

    pub fn is_cover_visible(&self) -> bool {
        self.cover_visible.get()
    }

    pub fn cover_visible_state(&self) -> State<bool> {
        self.cover_visible.as_state()
    }

    pub fn set_cover_visible(&self, visible: bool) {
        self.cover_visible.set(visible);
    }

    pub fn effects_follow_offset(&self) -> bool {
        self.effects_follow_offset.get()
    }

    pub fn set_effects_follow_offset(&self, follow: bool) {
        self.effects_follow_offset.set(follow);
    }

    /// Recompute the derived effects for the current offset and geometry.
    pub fn refresh_effects(&self) {
        let effects = self.effects_at(self.offset());
        self.opacity.set(effects.opacity);
        self.depth_scale.set(effects.depth_scale);
    }

    pub fn effects_at(&self, offset: f32) -> DerivedEffects {
        DerivedEffects::at_offset(self.geometry(), &self.config, offset)
    }

    pub fn set_system_insets(&self, top_inset: f32, window_height: f32) {
        self.top_inset.set(top_inset);
        self.window_height.set(window_height);
    }

    pub fn top_inset(&self) -> f32 {
        self.top_inset.get()
    }

    /// Exact comparison: only a settled panel counts as open.
    pub fn is_open(&self) -> bool {
        self.offset() == self.geometry().open_offset()
    }

    pub fn is_closed(&self) -> bool {
        self.offset() == self.geometry().closed_offset()
    }

    pub fn surface_layout(&self) -> SurfaceLayout {
        let geometry = self.geometry();
        let top_inset = self.top_inset();
        SurfaceLayout {
            size: Size::new(geometry.surface_width(), self.window_height.get()),
            padding: EdgeInsets::top(top_inset),
            translate_y: -top_inset,
            content_alignment: geometry.placement.content_alignment(),
        }
    }

    /// Render transform of the sliding surface.
    pub fn surface_layer(&self) -> GraphicsLayer {
        GraphicsLayer::default().with_translation(self.offset(), -self.top_inset())
    }

    /// Render transform of the content behind the panel.
    pub fn parent_layer(&self) -> GraphicsLayer {
        GraphicsLayer {
            alpha: self.opacity(),
            ..GraphicsLayer::default()
        }
        .with_scale(self.depth_scale())
    }
}

impl std::fmt::Debug for TransformModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformModel")
            .field("geometry", &self.geometry())
            .field("offset", &self.offset())
            .field("opacity", &self.opacity())
            .field("depth_scale", &self.depth_scale())
            .field("surface_visible", &self.is_surface_visible())
            .field("cover_visible", &self.is_cover_visible())
            .finish()
    }
}
