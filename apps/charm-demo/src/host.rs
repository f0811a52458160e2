//! Console-backed host collaborators.

use std::cell::Cell;

use charm_foundation::PointerId;
use charm_ui::{HostChrome, ParentContent, PointerCapture, SystemInsets, Visibility};

pub struct Toolbar {
    visibility: Cell<Visibility>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            visibility: Cell::new(Visibility::Visible),
        }
    }
}

impl HostChrome for Toolbar {
    fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    fn set_visibility(&self, visibility: Visibility) {
        log::info!("toolbar -> {visibility:?}");
        self.visibility.set(visibility);
    }
}

pub struct Screen {
    pub status_bar: f32,
    pub height: f32,
}

impl SystemInsets for Screen {
    fn top_inset(&self) -> f32 {
        self.status_bar
    }

    fn window_height(&self) -> f32 {
        self.height
    }
}

pub struct TouchSurface;

impl PointerCapture for TouchSurface {
    fn capture_pointer(&self, pointer: PointerId) -> bool {
        log::debug!("pointer {pointer} captured");
        true
    }

    fn release_pointer_capture(&self, pointer: PointerId) {
        log::debug!("pointer {pointer} released");
    }
}

/// Page content behind the panel.
pub struct Page {
    opacity: Cell<f32>,
    scale: Cell<f32>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            opacity: Cell::new(1.0),
            scale: Cell::new(1.0),
        }
    }
}

impl ParentContent for Page {
    fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    fn set_opacity(&self, opacity: f32) {
        self.opacity.set(opacity);
    }

    fn scale(&self) -> Option<f32> {
        Some(self.scale.get())
    }

    fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
    }
}
