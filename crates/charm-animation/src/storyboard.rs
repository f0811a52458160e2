//! Coordinated multi-property tweens.
//!
//! A [`Storyboard`] owns a set of tracks that share one [`AnimationSpec`] and
//! one frame clock registration, so every track sees the same eased
//! progress on every frame. Discrete actions scheduled "at end" run on the
//! final frame, before the completion callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use charm_core::{FrameCallbackRegistration, FrameClock};

use crate::{AnimationSpec, Lerp};

struct Track {
    label: &'static str,
    from: f32,
    to: f32,
    apply: Box<dyn FnMut(f32)>,
}

/// Builder for a set of concurrent tweens.
pub struct Storyboard {
    spec: AnimationSpec,
    tracks: Vec<Track>,
    end_actions: Vec<Box<dyn FnOnce()>>,
    completed: Vec<Box<dyn FnOnce()>>,
}

impl Storyboard {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            tracks: Vec::new(),
            end_actions: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Tween a property from `from` to `to`. `apply` receives every
    /// intermediate value and exactly `to` on the final frame.
    pub fn animate(
        mut self,
        label: &'static str,
        from: f32,
        to: f32,
        apply: impl FnMut(f32) + 'static,
    ) -> Self {
        self.tracks.push(Track {
            label,
            from,
            to,
            apply: Box::new(apply),
        });
        self
    }

    /// Discrete change applied once the tweens reach their targets.
    pub fn set_at_end(mut self, action: impl FnOnce() + 'static) -> Self {
        self.end_actions.push(Box::new(action));
        self
    }

    /// Callback fired once after every track and end action has run. Never
    /// fires for a stopped storyboard.
    pub fn on_completed(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.completed.push(Box::new(callback));
        self
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    pub fn track_labels(&self) -> Vec<&'static str> {
        self.tracks.iter().map(|track| track.label).collect()
    }

    /// Start running on `clock`. The first frame applies the `from` values.
    ///
    /// Dropping the returned handle stops the storyboard.
    pub fn begin(self, clock: &FrameClock) -> StoryboardHandle {
        log::trace!(
            "storyboard begin: {:?} over {}ms",
            self.track_labels(),
            self.spec.duration_millis
        );
        let inner = Rc::new(RefCell::new(StoryboardInner {
            spec: self.spec,
            tracks: self.tracks,
            end_actions: self.end_actions,
            completed: self.completed,
            clock: clock.clone(),
            start_time_nanos: None,
            progress: 0.0,
            registration: None,
            state: RunState::Running,
        }));
        StoryboardHandle::schedule_frame(&inner);
        StoryboardHandle { inner }
    }
}

impl fmt::Debug for Storyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storyboard")
            .field("spec", &self.spec)
            .field("tracks", &self.track_labels())
            .field("end_actions", &self.end_actions.len())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Completed,
    Stopped,
}

struct StoryboardInner {
    spec: AnimationSpec,
    tracks: Vec<Track>,
    end_actions: Vec<Box<dyn FnOnce()>>,
    completed: Vec<Box<dyn FnOnce()>>,
    clock: FrameClock,
    start_time_nanos: Option<u64>,
    progress: f32,
    registration: Option<FrameCallbackRegistration>,
    state: RunState,
}

/// Handle to a running storyboard.
pub struct StoryboardHandle {
    inner: Rc<RefCell<StoryboardInner>>,
}

impl StoryboardHandle {
    pub fn state(&self) -> RunState {
        self.inner.borrow().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Eased progress applied on the last frame.
    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    /// Stop where it is. Properties keep their last applied values and no
    /// end action or completion callback runs.
    pub fn stop(&self) {
        let (registration, tracks, end_actions, completed) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != RunState::Running {
                return;
            }
            inner.state = RunState::Stopped;
            (
                inner.registration.take(),
                std::mem::take(&mut inner.tracks),
                std::mem::take(&mut inner.end_actions),
                std::mem::take(&mut inner.completed),
            )
        };
        log::trace!("storyboard stopped");
        if let Some(registration) = registration {
            registration.cancel();
        }
        drop((tracks, end_actions, completed));
    }

    fn schedule_frame(this: &Rc<RefCell<StoryboardInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.state != RunState::Running {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            log::warn!("storyboard has no frame clock; jumping to end state");
            Self::apply_progress(this, 1.0, true);
            Self::finish(this);
        }
    }

    fn on_frame(this: &Rc<RefCell<StoryboardInner>>, frame_time_nanos: u64) {
        let (eased, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.state != RunState::Running {
                return;
            }
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let linear = inner.spec.linear_progress(elapsed_nanos);
            (inner.spec.easing.transform(linear), linear >= 1.0)
        };

        Self::apply_progress(this, eased, finished);
        if finished {
            Self::finish(this);
        } else {
            Self::schedule_frame(this);
        }
    }

    fn apply_progress(this: &Rc<RefCell<StoryboardInner>>, eased: f32, finished: bool) {
        // Track callbacks run without the storyboard borrowed.
        let mut tracks = {
            let mut inner = this.borrow_mut();
            inner.progress = if finished { 1.0 } else { eased };
            std::mem::take(&mut inner.tracks)
        };
        for track in tracks.iter_mut() {
            let value = if finished {
                track.to
            } else {
                track.from.lerp(&track.to, eased)
            };
            (track.apply)(value);
        }
        let mut inner = this.borrow_mut();
        if inner.state == RunState::Running {
            inner.tracks = tracks;
        }
    }

    fn finish(this: &Rc<RefCell<StoryboardInner>>) {
        let (end_actions, completed) = {
            let mut inner = this.borrow_mut();
            if inner.state != RunState::Running {
                return;
            }
            inner.state = RunState::Completed;
            inner.tracks.clear();
            (
                std::mem::take(&mut inner.end_actions),
                std::mem::take(&mut inner.completed),
            )
        };
        log::trace!("storyboard completed");
        for action in end_actions {
            action();
        }
        for callback in completed {
            callback();
        }
    }
}

impl Drop for StoryboardHandle {
    fn drop(&mut self) {
        // Frame callbacks only hold weak references; the last handle stops it.
        if Rc::strong_count(&self.inner) == 1 {
            self.stop();
        }
    }
}

impl fmt::Debug for StoryboardHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StoryboardHandle")
            .field("state", &inner.state)
            .field("progress", &inner.progress)
            .finish()
    }
}
