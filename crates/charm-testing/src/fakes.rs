//! Recording fakes for the host collaborators.

use std::cell::{Cell, RefCell};

use charm_foundation::PointerId;
use charm_ui::{HostChrome, ParentContent, PointerCapture, SystemInsets, Visibility};

/// Parent content that records every write.
pub struct FakeParentContent {
    opacity: Cell<f32>,
    scale: Option<Cell<f32>>,
    opacity_writes: RefCell<Vec<f32>>,
    scale_writes: RefCell<Vec<f32>>,
}

impl FakeParentContent {
    pub fn new() -> Self {
        Self {
            opacity: Cell::new(1.0),
            scale: Some(Cell::new(1.0)),
            opacity_writes: RefCell::new(Vec::new()),
            scale_writes: RefCell::new(Vec::new()),
        }
    }

    /// Content without a scale transform.
    pub fn without_scale() -> Self {
        Self {
            scale: None,
            ..Self::new()
        }
    }

    pub fn opacity_writes(&self) -> Vec<f32> {
        self.opacity_writes.borrow().clone()
    }

    pub fn scale_writes(&self) -> Vec<f32> {
        self.scale_writes.borrow().clone()
    }
}

impl Default for FakeParentContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ParentContent for FakeParentContent {
    fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    fn set_opacity(&self, opacity: f32) {
        self.opacity.set(opacity);
        self.opacity_writes.borrow_mut().push(opacity);
    }

    fn scale(&self) -> Option<f32> {
        self.scale.as_ref().map(Cell::get)
    }

    fn set_scale(&self, scale: f32) {
        if let Some(current) = &self.scale {
            current.set(scale);
        }
        self.scale_writes.borrow_mut().push(scale);
    }
}

/// Host chrome remembering every visibility it was given.
pub struct FakeChrome {
    visibility: Cell<Visibility>,
    history: RefCell<Vec<Visibility>>,
}

impl FakeChrome {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility: Cell::new(visibility),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn history(&self) -> Vec<Visibility> {
        self.history.borrow().clone()
    }
}

impl Default for FakeChrome {
    fn default() -> Self {
        Self::new(Visibility::Visible)
    }
}

impl HostChrome for FakeChrome {
    fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    fn set_visibility(&self, visibility: Visibility) {
        self.visibility.set(visibility);
        self.history.borrow_mut().push(visibility);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FakeInsets {
    pub top: f32,
    pub window_height: f32,
}

impl Default for FakeInsets {
    fn default() -> Self {
        Self {
            top: 32.0,
            window_height: 800.0,
        }
    }
}

impl SystemInsets for FakeInsets {
    fn top_inset(&self) -> f32 {
        self.top
    }

    fn window_height(&self) -> f32 {
        self.window_height
    }
}

/// Pointer capture that tracks the captured pointer.
#[derive(Default)]
pub struct RecordingCapture {
    captured: Cell<Option<PointerId>>,
    captures: Cell<usize>,
    releases: Cell<usize>,
}

impl RecordingCapture {
    pub fn captured(&self) -> Option<PointerId> {
        self.captured.get()
    }

    pub fn captures(&self) -> usize {
        self.captures.get()
    }

    pub fn releases(&self) -> usize {
        self.releases.get()
    }
}

impl PointerCapture for RecordingCapture {
    fn capture_pointer(&self, pointer: PointerId) -> bool {
        self.captured.set(Some(pointer));
        self.captures.set(self.captures.get() + 1);
        true
    }

    fn release_pointer_capture(&self, pointer: PointerId) {
        if self.captured.get() == Some(pointer) {
            self.captured.set(None);
        }
        self.releases.set(self.releases.get() + 1);
    }
}
