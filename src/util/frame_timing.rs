//! Frame-rate bookkeeping for the host render loop.

use web_time::{Duration, Instant};

/// Smoothed frames-per-second tracker for the host frame loop.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the rate was reported
    last_report: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Record a finished frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed rate, returned at most once per `interval` so hosts can log
    /// it without flooding.
    pub fn report(&mut self, interval: Duration) -> Option<f32> {
        let now = Instant::now();
        if now.duration_since(self.last_report) < interval {
            return None;
        }
        self.last_report = now;
        Some(self.smoothed_fps)
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames_and_throttles_reports() {
        let mut timing = FrameTiming::new();
        timing.end_frame();
        timing.end_frame();
        assert_eq!(timing.frames(), 2);
        assert!(timing.fps() > 0.0);
        assert!(timing.report(Duration::from_secs(3600)).is_none());
        assert!(timing.report(Duration::ZERO).is_some());
    }
}
