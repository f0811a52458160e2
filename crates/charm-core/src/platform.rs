//! Platform abstraction traits for runtime services.
//!
//! These traits let the host platform own scheduling and timekeeping, so the
//! engine can be driven by a real window loop or by a virtual clock in tests.

/// Schedules work for the runtime.
///
/// Implementations are responsible for waking the host when a frame or an
/// idle task has been requested.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}
