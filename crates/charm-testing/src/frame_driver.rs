//! Deterministic frame pump over a headless runtime.

use std::cell::Cell;

use charm_core::{Runtime, RuntimeHandle};

/// One frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Drives frame callbacks with a virtual clock that only moves when told.
pub struct FrameDriver {
    runtime: Runtime,
    time_nanos: Cell<u64>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::headless(),
            time_nanos: Cell::new(0),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn time_nanos(&self) -> u64 {
        self.time_nanos.get()
    }

    /// Run one frame at the current time, then step the clock by a frame.
    /// Returns whether any callback was pending.
    pub fn advance_frame(&self) -> bool {
        if !self.runtime.has_frame_callbacks() {
            return false;
        }
        self.runtime.drain_frame_callbacks(self.time_nanos.get());
        self.time_nanos.set(self.time_nanos.get() + FRAME_NANOS);
        true
    }

    /// Run frames until virtual time has moved by at least `millis`.
    pub fn advance_by_millis(&self, millis: u64) {
        let target = self.time_nanos.get() + millis * 1_000_000;
        while self.time_nanos.get() < target {
            if !self.advance_frame() {
                self.time_nanos.set(target);
            }
        }
    }

    /// Run frames until none are pending, then the idle tasks. Returns the
    /// number of frames run.
    pub fn settle(&self) -> usize {
        let mut frames = 0;
        while self.advance_frame() {
            frames += 1;
            if frames > 10_000 {
                log::warn!("frame driver gave up after {frames} frames");
                break;
            }
        }
        self.runtime.run_idle_tasks();
        frames
    }

    pub fn run_idle_tasks(&self) -> usize {
        self.runtime.run_idle_tasks()
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
