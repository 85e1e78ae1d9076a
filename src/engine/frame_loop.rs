//! Host frame-callback plumbing.
//!
//! The engine never schedules itself. A [`FrameScheduler`] stands in for
//! whatever the host uses to get called back before the next repaint, and
//! [`FrameLoop`] keeps exactly one request outstanding while running.

use web_time::{Duration, Instant};

use super::{FrameInput, FrameOutcome, MorphEngine, Viewport};
use crate::sampler::Rasterizer;
use crate::util::frame_timing::FrameTiming;

/// Callback gap reported as a stall.
const STALL: Duration = Duration::from_millis(250);

/// Token for one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Requests and cancels per-frame callbacks.
pub trait FrameScheduler {
    /// Ask to be called back once before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that pump frames themselves.
///
/// Holds at most one pending handle; the host polls [`pending`](Self::pending)
/// and calls [`FrameLoop::on_frame`] with it.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Option<FrameHandle>,
    cancelled: usize,
}

impl ManualScheduler {
    /// Fresh scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// How many requests were cancelled.
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}

/// Drives a [`MorphEngine`] from scheduler callbacks.
///
/// Dropping the loop stops it, cancelling any outstanding request.
pub struct FrameLoop<R: Rasterizer, S: FrameScheduler> {
    engine: MorphEngine<R>,
    scheduler: S,
    pending: Option<FrameHandle>,
    timing: FrameTiming,
}

impl<R: Rasterizer, S: FrameScheduler> FrameLoop<R, S> {
    /// Stopped loop.
    pub fn new(engine: MorphEngine<R>, scheduler: S) -> Self {
        Self {
            engine,
            scheduler,
            pending: None,
            timing: FrameTiming::new(),
        }
    }

    /// Request the first frame. No-op while already running.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
            log::debug!("frame loop started");
        }
    }

    /// Cancel the outstanding request. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::debug!("frame loop stopped after {} frames", self.timing.frames());
        }
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Scheduler callback. Runs one engine frame and requests the next.
    ///
    /// Returns `None` for a stale or cancelled handle.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        input: &FrameInput,
        viewport: Viewport,
    ) -> Option<FrameOutcome> {
        if self.pending != Some(handle) {
            return None;
        }
        let gap = self.timing.since_last(now);
        if self.timing.frames() > 0 && gap > STALL {
            log::debug!("frame callback stalled for {gap:?}");
        }
        let outcome = self.engine.frame(now, input, viewport);
        self.timing.end_frame(now);
        self.pending = Some(self.scheduler.request_frame());
        Some(outcome)
    }

    /// Smoothed callback rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// The driven engine.
    #[must_use]
    pub fn engine(&self) -> &MorphEngine<R> {
        &self.engine
    }

    /// Mutable access to the driven engine.
    pub fn engine_mut(&mut self) -> &mut MorphEngine<R> {
        &mut self.engine
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<R: Rasterizer, S: FrameScheduler> Drop for FrameLoop<R, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
