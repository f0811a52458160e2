//! Animated settle of the panel to a resting position.
//!
//! Offset, opacity and (when the parent content can scale) depth scale run
//! as one [`Storyboard`] from their live values, so a drag released halfway
//! up the rubber band settles without a jump. Starting a transition stops
//! the one in flight.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use charm_animation::{AnimationSpec, Storyboard, StoryboardHandle};
use charm_core::{FrameClock, RuntimeHandle};

use crate::host::{HostChrome, Visibility};
use crate::model::TransformModel;

/// Inputs of one transition.
pub struct TransitionRequest {
    pub open: bool,
    /// Live opacity of the parent content.
    pub opacity_from: f32,
    /// Live parent scale, `None` to leave the depth scale alone.
    pub scale_from: Option<f32>,
    /// Made visible right away when closing.
    pub chrome: Option<Rc<dyn HostChrome>>,
    pub on_settled: Box<dyn FnOnce()>,
}

pub struct TransitionController {
    runtime: RuntimeHandle,
    clock: FrameClock,
    spec: AnimationSpec,
    running: RefCell<Option<StoryboardHandle>>,
    target_open: Cell<bool>,
}

impl TransitionController {
    pub fn new(runtime: RuntimeHandle, spec: AnimationSpec) -> Self {
        Self {
            clock: runtime.frame_clock(),
            runtime,
            spec,
            running: RefCell::new(None),
            target_open: Cell::new(false),
        }
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    pub fn is_running(&self) -> bool {
        self.running
            .borrow()
            .as_ref()
            .map_or(false, StoryboardHandle::is_running)
    }

    /// Whether the running transition heads to open. `None` when idle.
    pub fn target(&self) -> Option<bool> {
        self.is_running().then(|| self.target_open.get())
    }

    pub fn animate_to(&self, model: &TransformModel, request: TransitionRequest) {
        self.cancel();

        let TransitionRequest {
            open,
            opacity_from,
            scale_from,
            chrome,
            on_settled,
        } = request;
        let config = *model.config();
        let geometry = model.geometry();
        let offset_from = model.offset();
        let offset_to = geometry.resting_offset(open);
        let (opacity_to, scale_to) = if open {
            (config.open_opacity, config.open_depth_scale())
        } else {
            (config.closed_opacity, config.closed_depth_scale())
        };
        log::debug!(
            "transition to {}: offset {offset_from} -> {offset_to}",
            if open { "open" } else { "closed" }
        );

        model.set_effects_follow_offset(false);
        let mut storyboard = Storyboard::new(self.spec)
            .animate("offset", offset_from, offset_to, {
                let model = model.clone();
                move |value| model.set_offset(value)
            })
            .animate("opacity", opacity_from, opacity_to, {
                let model = model.clone();
                move |value| model.set_opacity(value)
            });
        if let Some(scale_from) = scale_from {
            storyboard = storyboard.animate("depth_scale", scale_from, scale_to, {
                let model = model.clone();
                move |value| model.set_depth_scale(value)
            });
        }
        if !open {
            let model = model.clone();
            storyboard = storyboard.set_at_end(move || model.set_surface_visible(false));
        }

        let storyboard = storyboard.on_completed({
            let model = model.clone();
            let runtime = self.runtime.clone();
            move || {
                model.set_effects_follow_offset(true);
                if !open {
                    schedule_depth_reset(&runtime, model);
                }
                on_settled();
            }
        });

        if !open {
            if let Some(chrome) = chrome {
                chrome.set_visibility(Visibility::Visible);
            }
        }
        self.target_open.set(open);
        let handle = storyboard.begin(&self.clock);
        *self.running.borrow_mut() = Some(handle);
    }

    /// Stop the transition in flight, leaving every property at its live
    /// value. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let running = self.running.take();
        let Some(handle) = running else {
            return false;
        };
        let was_running = handle.is_running();
        handle.stop();
        if was_running {
            log::debug!("transition stopped at progress {}", handle.progress());
        }
        was_running
    }
}

/// Once the host is idle, snap the depth scale of a closed panel to exactly
/// its resting value.
fn schedule_depth_reset(runtime: &RuntimeHandle, model: TransformModel) {
    let posted = runtime.post_idle_task(move || {
        if model.is_closed() {
            model.set_depth_scale(model.config().closed_depth_scale());
        }
    });
    if !posted {
        log::warn!("runtime gone; depth scale reset skipped");
    }
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("spec", &self.spec)
            .field("running", &self.is_running())
            .finish()
    }
}
