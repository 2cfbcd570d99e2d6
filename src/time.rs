//! Frame timing.
//!
//! [`FrameClock`] counts frames and samples frames-per-second over a fixed
//! interval. Hosts pass the frame timestamp in, so the clock works the same
//! with `performance.now()` on the web and with tests that fake time.
//!
//! # Example
//!
//! ```ignore
//! use constellation::time::FrameClock;
//! use web_time::Instant;
//!
//! let mut clock = FrameClock::new(Instant::now());
//!
//! // In the frame callback:
//! if let Some(fps) = clock.tick(Instant::now()) {
//!     log::info!("{:.1} fps", fps);
//! }
//! ```

use web_time::{Duration, Instant};

/// Frame counter with periodic FPS sampling.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Most recent FPS sample.
    fps: f32,
    /// Frame count at last FPS sample.
    fps_frame_count: u64,
    /// Time of last FPS sample.
    fps_update_time: Instant,
    /// How often to sample FPS.
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(5),
        }
    }

    /// Set how often FPS is sampled.
    pub fn with_fps_interval(mut self, interval: Duration) -> Self {
        self.fps_update_interval = interval;
        self
    }

    /// Record a frame at `now`. Returns a fresh FPS sample when the sampling
    /// interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval && !fps_elapsed.is_zero() {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return Some(self.fps);
        }
        None
    }

    /// Time since the previous frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS sample, 0 before the first one.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time from creation to the last recorded frame.
    pub fn elapsed(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new(Instant::now());
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_counts_and_measures_delta() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);
        clock.tick(t0 + Duration::from_millis(16));
        clock.tick(t0 + Duration::from_millis(32));

        assert_eq!(clock.frame(), 2);
        assert!((clock.delta() - 0.016).abs() < 1e-4);
        assert_eq!(clock.elapsed(), Duration::from_millis(32));
    }

    #[test]
    fn test_fps_sampled_per_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0).with_fps_interval(Duration::from_secs(1));

        let mut samples = Vec::new();
        for i in 1..=120u64 {
            if let Some(fps) = clock.tick(t0 + Duration::from_millis(i * 1000 / 60)) {
                samples.push(fps);
            }
        }

        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 60.0).abs() < 0.5);
    }
}
