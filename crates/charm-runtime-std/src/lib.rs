//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform abstraction
//! traits defined in `charm-core`, plus [`StdRuntime`], a real-time frame
//! pump for hosts that do not bring their own frame scheduler.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use charm_core::{Clock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::{Duration, Instant};

/// Scheduler that records frame requests for [`StdRuntime::pump`].
pub struct StdScheduler {
    frame_requested: AtomicBool,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
    }
}

/// Clock implementation backed by [`web_time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Outcome of one [`StdRuntime::pump`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpResult {
    /// Frame callbacks ran and more frames are pending.
    Animating,
    /// No frames were pending; this many idle tasks ran.
    Idle(usize),
}

/// Convenience container bundling the standard scheduler, clock and runtime.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    started: Instant,
    runtime: Runtime,
}

impl StdRuntime {
    /// Nominal frame interval for [`StdRuntime::run_until_idle`].
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let clock = StdClock;
        Self {
            scheduler,
            started: clock.now(),
            clock,
            runtime,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Nanoseconds since this runtime was created, used as frame time.
    pub fn frame_time_nanos(&self) -> u64 {
        self.clock.elapsed_nanos(self.started)
    }

    /// Drain pending frame callbacks at the current time, or run idle tasks
    /// when no frame is pending.
    pub fn pump(&self) -> PumpResult {
        self.scheduler.take_frame_request();
        if self.runtime.has_frame_callbacks() {
            self.runtime.drain_frame_callbacks(self.frame_time_nanos());
            if self.runtime.has_frame_callbacks() {
                return PumpResult::Animating;
            }
        }
        PumpResult::Idle(self.runtime.run_idle_tasks())
    }

    /// Pump frames in real time until neither frames nor idle tasks remain.
    /// Returns the number of frames drawn.
    pub fn run_until_idle(&self) -> usize {
        let mut frames = 0;
        loop {
            match self.pump() {
                PumpResult::Animating => {
                    frames += 1;
                    std::thread::sleep(Self::FRAME_INTERVAL);
                }
                PumpResult::Idle(_) if self.runtime.needs_frame() => {
                    frames += 1;
                }
                PumpResult::Idle(ran) => {
                    log::trace!("runtime idle after {frames} frames ({ran} idle tasks)");
                    return frames;
                }
            }
        }
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("elapsed_nanos", &self.frame_time_nanos())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn scheduler_records_frame_requests() {
        let runtime = StdRuntime::new();
        let _registration = runtime
            .runtime_handle()
            .frame_clock()
            .with_frame_nanos(|_| {});
        assert!(runtime.scheduler().take_frame_request());
        assert!(!runtime.scheduler().take_frame_request());
    }

    #[test]
    fn pump_runs_idle_tasks_once_frames_are_done() {
        let runtime = StdRuntime::new();
        let handle = runtime.runtime_handle();
        let ran = Rc::new(Cell::new(0));

        let _registration = handle.frame_clock().with_frame_nanos(|_| {});
        {
            let ran = Rc::clone(&ran);
            handle.post_idle_task(move || ran.set(ran.get() + 1));
        }

        assert_eq!(runtime.pump(), PumpResult::Idle(1));
        assert_eq!(ran.get(), 1);
        assert_eq!(runtime.pump(), PumpResult::Idle(0));
    }

    #[test]
    fn run_until_idle_follows_chained_frames() {
        let runtime = StdRuntime::new();
        let handle = runtime.runtime_handle();
        let remaining = Rc::new(Cell::new(3u32));

        fn chain(handle: RuntimeHandle, remaining: Rc<Cell<u32>>) {
            let next = handle.clone();
            let registration = handle.frame_clock().with_frame_nanos(move |_| {
                remaining.set(remaining.get() - 1);
                if remaining.get() > 0 {
                    chain(next, remaining);
                }
            });
            std::mem::forget(registration);
        }

        chain(handle, Rc::clone(&remaining));
        let frames = runtime.run_until_idle();

        assert_eq!(remaining.get(), 0);
        assert!(frames >= 2);
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = StdClock;
        let start = clock.now();
        let first = clock.elapsed_nanos(start);
        let second = clock.elapsed_nanos(start);
        assert!(second >= first);
    }
}
