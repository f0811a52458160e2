//! Collaborators supplied by the host page.

use std::rc::Rc;

use charm_foundation::PointerId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Collapsed,
}

/// Page chrome (for example a bottom toolbar) hidden while a drag runs.
pub trait HostChrome {
    fn visibility(&self) -> Visibility;
    fn set_visibility(&self, visibility: Visibility);
}

/// Screen area reserved by the system.
pub trait SystemInsets {
    /// Height reserved at the top of the screen (status or tray area).
    fn top_inset(&self) -> f32;
    fn window_height(&self) -> f32;
}

pub trait PointerCapture {
    /// Route every later event of `pointer` to the panel. Returns whether
    /// capture was granted.
    fn capture_pointer(&self, pointer: PointerId) -> bool;
    fn release_pointer_capture(&self, pointer: PointerId);
}

/// The content behind the panel. The panel only ever writes its opacity and
/// depth scale.
pub trait ParentContent {
    fn opacity(&self) -> f32;
    fn set_opacity(&self, opacity: f32);
    /// Current uniform scale, or `None` when the content has no scale
    /// transform.
    fn scale(&self) -> Option<f32>;
    fn set_scale(&self, scale: f32);
}

/// Collaborators wired in when the panel's template is applied. Each one is
/// optional; a missing collaborator turns the matching step into a no-op.
#[derive(Clone, Default)]
pub struct CharmHost {
    pub chrome: Option<Rc<dyn HostChrome>>,
    pub insets: Option<Rc<dyn SystemInsets>>,
    pub capture: Option<Rc<dyn PointerCapture>>,
    /// Parent content used by `on_loaded` when none was attached explicitly.
    pub default_parent: Option<Rc<dyn ParentContent>>,
}

impl CharmHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chrome(mut self, chrome: Rc<dyn HostChrome>) -> Self {
        self.chrome = Some(chrome);
        self
    }

    pub fn with_insets(mut self, insets: Rc<dyn SystemInsets>) -> Self {
        self.insets = Some(insets);
        self
    }

    pub fn with_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_default_parent(mut self, parent: Rc<dyn ParentContent>) -> Self {
        self.default_parent = Some(parent);
        self
    }
}

impl std::fmt::Debug for CharmHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharmHost")
            .field("chrome", &self.chrome.is_some())
            .field("insets", &self.insets.is_some())
            .field("capture", &self.capture.is_some())
            .field("default_parent", &self.default_parent.is_some())
            .finish()
    }
}
