//! A charm wired to fakes and a virtual frame clock.

use std::rc::Rc;

use charm_foundation::{PointerEvent, PointerId};
use charm_ui::{Charm, CharmConfig, CharmHost, EdgePlacement};

use crate::fakes::{FakeChrome, FakeInsets, FakeParentContent, RecordingCapture};
use crate::frame_driver::FrameDriver;

/// Vertical position used for scripted pointer events.
const POINTER_Y: f32 = 120.0;

pub struct CharmTestRule {
    pub driver: FrameDriver,
    pub charm: Charm,
    pub parent: Rc<FakeParentContent>,
    pub chrome: Rc<FakeChrome>,
    pub insets: Rc<FakeInsets>,
    pub capture: Rc<RecordingCapture>,
    pointer: PointerId,
}

impl CharmTestRule {
    pub fn new(placement: EdgePlacement, width: f32) -> Self {
        Self::with_parts(placement, width, CharmConfig::default(), FakeParentContent::new())
    }

    /// Parent content without a scale transform.
    pub fn without_scale(placement: EdgePlacement, width: f32) -> Self {
        Self::with_parts(
            placement,
            width,
            CharmConfig::default(),
            FakeParentContent::without_scale(),
        )
    }

    /// Charm with the template applied and the parent supplied as the host
    /// default, attached through `on_loaded`.
    pub fn with_parts(
        placement: EdgePlacement,
        width: f32,
        config: CharmConfig,
        parent: FakeParentContent,
    ) -> Self {
        let driver = FrameDriver::new();
        let charm = match Charm::with_config(driver.handle(), placement, width, config) {
            Ok(charm) => charm,
            Err(err) => panic!("test charm rejected: {err}"),
        };
        let parent = Rc::new(parent);
        let chrome = Rc::new(FakeChrome::default());
        let insets = Rc::new(FakeInsets::default());
        let capture = Rc::new(RecordingCapture::default());
        charm.apply_template(
            CharmHost::new()
                .with_chrome(chrome.clone())
                .with_insets(insets.clone())
                .with_capture(capture.clone())
                .with_default_parent(parent.clone()),
        );
        if let Err(err) = charm.on_loaded() {
            panic!("on_loaded failed: {err}");
        }
        Self {
            driver,
            charm,
            parent,
            chrome,
            insets,
            capture,
            pointer: 1,
        }
    }

    pub fn offset(&self) -> f32 {
        self.charm.offset()
    }

    pub fn press(&self, x: f32) -> bool {
        self.send(PointerEvent::down(x, POINTER_Y))
    }

    pub fn move_to(&self, x: f32) -> bool {
        self.send(PointerEvent::moved(x, POINTER_Y))
    }

    pub fn release(&self, x: f32) -> bool {
        self.send(PointerEvent::up(x, POINTER_Y))
    }

    pub fn cancel(&self) -> bool {
        self.send(PointerEvent::cancel(0.0, POINTER_Y))
    }

    /// Press at `from`, move in `steps` even increments to `to`, release.
    pub fn drag(&self, from: f32, to: f32, steps: usize) {
        self.press(from);
        let steps = steps.max(1);
        for step in 1..=steps {
            let x = from + (to - from) * step as f32 / steps as f32;
            self.move_to(x);
        }
        self.release(to);
    }

    /// Run every pending frame and idle task.
    pub fn settle(&self) -> usize {
        self.driver.settle()
    }

    fn send(&self, event: PointerEvent) -> bool {
        self.charm.handle_pointer_event(&event.with_id(self.pointer))
    }
}
