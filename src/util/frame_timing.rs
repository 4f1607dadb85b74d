use web_time::{Duration, Instant};

/// Longest frame delta handed to the camera. A stalled frame (window drag,
/// debugger pause) would otherwise make the damped camera jump.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Per-frame clock: measures deltas between ticks and keeps a smoothed FPS.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Timestamp of the previous tick.
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start the clock now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance the clock and return the elapsed seconds since the previous
    /// tick, clamped to [`MAX_FRAME_DELTA`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed.as_secs_f32());
        elapsed.min(MAX_FRAME_DELTA).as_secs_f32()
    }

    /// Fold an externally measured frame time into the FPS average.
    pub fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
