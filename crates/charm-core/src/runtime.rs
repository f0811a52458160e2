use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

pub type FrameCallbackId = u64;

/// Scheduler for hosts that poll the runtime themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    idle_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            idle_tasks: RefCell::new(VecDeque::new()),
            needs_frame: Cell::new(false),
        }
    }

    fn schedule(&self) {
        if !self.needs_frame.replace(true) {
            self.scheduler.schedule_frame();
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        let callbacks_empty = callbacks.is_empty();
        drop(callbacks);
        if callbacks_empty && self.idle_tasks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "draining {} frame callbacks at {}ns",
            pending.len(),
            frame_time_nanos
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() && self.idle_tasks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn post_idle_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.idle_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn run_idle_tasks(&self) -> usize {
        // Tasks posted while running wait for the next idle period.
        let pending: Vec<_> = self.idle_tasks.borrow_mut().drain(..).collect();
        let count = pending.len();
        for task in pending {
            task();
        }
        if !self.has_frame_callbacks() && self.idle_tasks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
        count
    }
}

/// Owner of the runtime state. Dropping it invalidates every handle.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    /// Runtime whose host polls for work instead of being woken.
    pub fn headless() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn run_idle_tasks(&self) -> usize {
        self.inner.run_idle_tasks()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn has_idle_tasks(&self) -> bool {
        !self.inner.idle_tasks.borrow().is_empty()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Weak handle to the runtime. All operations no-op once the runtime is
/// dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Queue a one-shot task to run once the host reports it is idle.
    ///
    /// Returns `false` when the runtime is gone and the task was dropped.
    pub fn post_idle_task(&self, task: impl FnOnce() + 'static) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.post_idle_task(Box::new(task));
                true
            }
            None => false,
        }
    }

    pub fn run_idle_tasks(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.run_idle_tasks())
            .unwrap_or(0)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
