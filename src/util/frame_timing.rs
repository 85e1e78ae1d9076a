//! Frame-rate bookkeeping for host-driven frame loops.

use web_time::{Duration, Instant};

/// Smoothed frame-rate measurement for a host-driven frame loop.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Timestamp of the previous completed frame, if any.
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Number of frames recorded since construction.
    frames: u64,
}

impl FrameTiming {
    /// Create a new timer. The smoothed value starts at 60 FPS.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Record a completed frame at `now`.
    pub fn end_frame(&mut self, now: Instant) {
        self.frames += 1;
        let Some(last) = self.last_frame.replace(now) else {
            return;
        };

        let frame_time = now.saturating_duration_since(last).as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Time since the last recorded frame, or zero before the first frame.
    #[must_use]
    pub fn since_last(&self, now: Instant) -> Duration {
        self.last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last))
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of frames recorded.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_frames_pull_fps_toward_rate() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        for i in 0..400 {
            timing.end_frame(start + Duration::from_millis(10 * i));
        }
        assert_eq!(timing.frames(), 400);
        assert!((timing.fps() - 100.0).abs() < 1.0, "fps {}", timing.fps());
    }

    #[test]
    fn first_frame_only_records_timestamp() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        assert_eq!(timing.since_last(start), Duration::ZERO);
        timing.end_frame(start);
        assert_eq!(timing.fps(), 60.0);
        assert_eq!(
            timing.since_last(start + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }
}
