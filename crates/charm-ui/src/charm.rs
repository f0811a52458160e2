//! The charm panel façade.

use std::cell::RefCell;
use std::rc::Rc;

use charm_core::{RuntimeHandle, StateSubscription};
use charm_foundation::{PointerEvent, PointerEventKind, PointerId};
use charm_ui_graphics::{GraphicsLayer, Point};
use smallvec::SmallVec;

use crate::config::CharmConfig;
use crate::error::{check_width, CharmError};
use crate::exclusivity::{self, CharmId};
use crate::gesture::{GestureContext, GestureState, GestureTracker, ReleaseOutcome};
use crate::host::{CharmHost, ParentContent};
use crate::model::{PanelGeometry, SurfaceLayout, TransformModel};
use crate::placement::EdgePlacement;
use crate::rubber_band::RubberBand;
use crate::transition::{TransitionController, TransitionRequest};

/// Edge-anchored sliding panel.
///
/// Pointer input and programmatic `open`/`close` are ignored until
/// [`Charm::apply_template`] has wired in the host collaborators. Parent
/// content receives opacity and depth scale writes through subscriptions on
/// the [`TransformModel`]. No borrow of the charm is held while host
/// collaborators or observers run, so they may query it.
#[derive(Clone)]
pub struct Charm {
    inner: Rc<CharmInner>,
}

struct ParentBinding {
    content: Rc<dyn ParentContent>,
    _subscriptions: SmallVec<[StateSubscription; 2]>,
}

struct CharmInner {
    id: CharmId,
    config: CharmConfig,
    model: TransformModel,
    gesture: GestureTracker,
    transition: TransitionController,
    host: RefCell<Option<CharmHost>>,
    parent: RefCell<Option<ParentBinding>>,
}

impl Charm {
    pub fn new(
        runtime: RuntimeHandle,
        placement: EdgePlacement,
        width: f32,
    ) -> Result<Self, CharmError> {
        Self::with_config(runtime, placement, width, CharmConfig::default())
    }

    pub fn with_config(
        runtime: RuntimeHandle,
        placement: EdgePlacement,
        width: f32,
        config: CharmConfig,
    ) -> Result<Self, CharmError> {
        config.validate()?;
        let geometry = PanelGeometry::new(placement, width)?;
        let id = CharmId::next();
        log::debug!("{id}: created, {placement:?} edge, width {width}");
        Ok(Self {
            inner: Rc::new(CharmInner {
                id,
                config,
                model: TransformModel::new(geometry, config),
                gesture: GestureTracker::new(RubberBand::new(config.damping_divisor)),
                transition: TransitionController::new(runtime, config.transition),
                host: RefCell::new(None),
                parent: RefCell::new(None),
            }),
        })
    }

    pub fn id(&self) -> CharmId {
        self.inner.id
    }

    pub fn config(&self) -> CharmConfig {
        self.inner.config
    }

    /// Shared handle to the transform model for observers and renderers.
    pub fn model(&self) -> TransformModel {
        self.inner.model.clone()
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.inner.model.geometry()
    }

    pub fn offset(&self) -> f32 {
        self.inner.model.offset()
    }

    pub fn is_open(&self) -> bool {
        self.inner.model.is_open()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.gesture.is_dragging()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.inner.gesture.state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.transition.is_running()
    }

    pub fn is_template_applied(&self) -> bool {
        self.inner.host.borrow().is_some()
    }

    /// Wire in the host collaborators and snap the surface closed.
    pub fn apply_template(&self, host: CharmHost) {
        let inner = &*self.inner;
        inner.transition.cancel();
        if let Some(previous) = inner.host() {
            inner.gesture.abandon(&previous);
        }
        if let Some(insets) = &host.insets {
            inner
                .model
                .set_system_insets(insets.top_inset(), insets.window_height());
        }
        let closed = inner.model.geometry().closed_offset();
        inner.model.set_effects_follow_offset(true);
        inner.model.set_offset(closed);
        inner.model.set_surface_visible(false);
        inner.model.set_cover_visible(false);
        log::debug!("{}: template applied ({host:?})", inner.id);
        *inner.host.borrow_mut() = Some(host);
    }

    /// Falls back to the host's default parent content when none was
    /// attached explicitly.
    pub fn on_loaded(&self) -> Result<(), CharmError> {
        let Some(host) = self.inner.host() else {
            return Err(CharmError::NotAttached {
                operation: "on_loaded",
            });
        };
        if self.inner.parent.borrow().is_some() {
            return Ok(());
        }
        match host.default_parent {
            Some(parent) => self.attach_parent_content(parent),
            None => log::debug!("{}: loaded without parent content", self.inner.id),
        }
        Ok(())
    }

    /// Start mirroring opacity and depth scale onto `parent`, replacing any
    /// previously attached content.
    pub fn attach_parent_content(&self, parent: Rc<dyn ParentContent>) {
        let model = &self.inner.model;
        let mut subscriptions = SmallVec::new();
        subscriptions.push(model.opacity_state().subscribe({
            let parent = Rc::clone(&parent);
            move |opacity: &f32| parent.set_opacity(*opacity)
        }));
        subscriptions.push(model.depth_scale_state().subscribe({
            let parent = Rc::clone(&parent);
            move |scale: &f32| {
                if parent.scale().is_some() {
                    parent.set_scale(*scale);
                }
            }
        }));
        let previous = self.inner.parent.replace(Some(ParentBinding {
            content: parent,
            _subscriptions: subscriptions,
        }));
        drop(previous);
    }

    pub fn detach_parent_content(&self) -> Option<Rc<dyn ParentContent>> {
        let binding = self.inner.parent.take();
        binding.map(|binding| binding.content)
    }

    pub fn surface_layout(&self) -> Result<SurfaceLayout, CharmError> {
        if !self.is_template_applied() {
            return Err(CharmError::NotAttached {
                operation: "surface_layout",
            });
        }
        Ok(self.inner.model.surface_layout())
    }

    pub fn surface_layer(&self) -> GraphicsLayer {
        self.inner.model.surface_layer()
    }

    pub fn parent_layer(&self) -> GraphicsLayer {
        self.inner.model.parent_layer()
    }

    /// Route one pointer event. Handled events are marked consumed.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        let handled = match event.kind {
            PointerEventKind::Down => self.on_pointer_pressed(event.id, event.position),
            PointerEventKind::Move => self.on_pointer_moved(event.id, event.position),
            PointerEventKind::Up => self.on_pointer_released(event.id, event.position),
            PointerEventKind::Cancel => self.on_pointer_canceled(event.id),
        };
        if handled {
            event.consume();
        }
        handled
    }

    pub fn on_pointer_pressed(&self, pointer: PointerId, position: Point) -> bool {
        let inner = &*self.inner;
        let Some(host) = inner.host() else {
            log::warn!("{}: press before template applied; ignored", inner.id);
            return false;
        };
        let interrupted = inner.transition.target();
        inner.transition.cancel();
        inner
            .gesture
            .press(pointer, position, interrupted, inner.context(&host));
        true
    }

    pub fn on_pointer_moved(&self, pointer: PointerId, position: Point) -> bool {
        let inner = &*self.inner;
        if !inner.gesture.is_dragging() {
            return false;
        }
        inner.gesture.drag(pointer, position, &inner.model).is_some()
    }

    pub fn on_pointer_released(&self, pointer: PointerId, position: Point) -> bool {
        let inner = &*self.inner;
        let Some(host) = inner.host() else {
            return false;
        };
        match inner.gesture.release(pointer, position, inner.context(&host)) {
            Some(outcome) => {
                inner.settle(outcome, &host);
                true
            }
            None => false,
        }
    }

    pub fn on_pointer_canceled(&self, pointer: PointerId) -> bool {
        let inner = &*self.inner;
        let Some(host) = inner.host() else {
            return false;
        };
        match inner.gesture.cancel(pointer, inner.context(&host)) {
            Some(outcome) => {
                inner.settle(outcome, &host);
                true
            }
            None => false,
        }
    }

    /// The light-dismiss cover was tapped.
    pub fn on_cover_tapped(&self) {
        log::debug!("{}: cover tapped", self.inner.id);
        self.close();
    }

    /// Animate open. The exclusivity slot is emptied whoever holds it.
    pub fn open(&self) {
        let inner = &*self.inner;
        let Some(host) = inner.host() else {
            log::warn!("{}: open before template applied; ignored", inner.id);
            return;
        };
        inner.gesture.abandon(&host);
        inner.model.set_surface_visible(true);
        inner.start_transition(true, &host);
        inner.model.set_cover_visible(true);
        exclusivity::clear();
    }

    /// Animate closed. The exclusivity slot is emptied whoever holds it.
    pub fn close(&self) {
        let inner = &*self.inner;
        let Some(host) = inner.host() else {
            log::warn!("{}: close before template applied; ignored", inner.id);
            return;
        };
        inner.gesture.abandon(&host);
        inner.start_transition(false, &host);
        inner.model.set_cover_visible(false);
        exclusivity::clear();
    }

    /// Move the panel to the other edge. Snaps without animating.
    pub fn set_edge_placement(&self, placement: EdgePlacement) {
        let geometry = self.inner.model.geometry();
        if geometry.placement == placement {
            return;
        }
        self.inner.reconfigure(PanelGeometry {
            placement,
            ..geometry
        });
    }

    /// Resize the panel. Snaps without animating.
    pub fn set_panel_width(&self, width: f32) -> Result<(), CharmError> {
        let width = check_width(width).map_err(|err| {
            log::warn!("{}: {err}", self.inner.id);
            err
        })?;
        let geometry = self.inner.model.geometry();
        if geometry.width == width {
            return Ok(());
        }
        self.inner.reconfigure(PanelGeometry { width, ..geometry });
        Ok(())
    }
}

impl CharmInner {
    fn host(&self) -> Option<CharmHost> {
        self.host.borrow().clone()
    }

    fn context<'a>(&'a self, host: &'a CharmHost) -> GestureContext<'a> {
        GestureContext {
            id: self.id,
            model: &self.model,
            host,
        }
    }

    fn settle(&self, outcome: ReleaseOutcome, host: &CharmHost) {
        match outcome {
            ReleaseOutcome::TapCancelled => {}
            ReleaseOutcome::Open => self.start_transition(true, host),
            ReleaseOutcome::Close => self.start_transition(false, host),
        }
    }

    fn start_transition(&self, open: bool, host: &CharmHost) {
        let parent = self
            .parent
            .borrow()
            .as_ref()
            .map(|binding| Rc::clone(&binding.content));
        let (opacity_from, scale_from) = match parent {
            Some(content) => (content.opacity(), content.scale()),
            None => (self.model.opacity(), Some(self.model.depth_scale())),
        };
        let request = TransitionRequest {
            open,
            opacity_from,
            scale_from,
            chrome: host.chrome.clone(),
            on_settled: Box::new(self.gesture.settle_callback()),
        };
        self.transition.animate_to(&self.model, request);
    }

    /// Snap to the resting offset of `geometry` for the panel's current or
    /// pending open state.
    fn reconfigure(&self, geometry: PanelGeometry) {
        let host = self.host();
        let session = host.as_ref().and_then(|host| self.gesture.abandon(host));
        let open = self
            .transition
            .target()
            .or(session.map(|session| session.was_open))
            .unwrap_or_else(|| self.model.is_open());
        self.transition.cancel();

        self.model.set_geometry(geometry);
        self.model.set_effects_follow_offset(true);
        self.model.set_offset(geometry.resting_offset(open));
        self.model.refresh_effects();
        self.model.set_surface_visible(open);
        self.model.set_cover_visible(open);

        if !open {
            exclusivity::release(self.id);
            let chrome = host.as_ref().and_then(|host| host.chrome.as_ref());
            if let (Some(chrome), Some(snapshot)) =
                (chrome, session.and_then(|session| session.chrome_snapshot))
            {
                chrome.set_visibility(snapshot);
            }
        }
        log::debug!(
            "{}: reconfigured to {:?} edge, width {}, {}",
            self.id,
            geometry.placement,
            geometry.width,
            if open { "open" } else { "closed" }
        );
    }
}

impl Drop for CharmInner {
    fn drop(&mut self) {
        exclusivity::release(self.id);
    }
}

impl std::fmt::Debug for Charm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Charm")
            .field("id", &self.inner.id)
            .field("model", &self.inner.model)
            .field("gesture", &self.inner.gesture.state())
            .field("transition", &self.inner.transition)
            .field("template_applied", &self.is_template_applied())
            .finish()
    }
}
