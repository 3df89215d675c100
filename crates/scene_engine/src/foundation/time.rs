//! Time management utilities

/// Frame clock driven by host timestamps.
///
/// The host hands over a high-resolution timestamp in milliseconds each frame;
/// the clock converts it to seconds and derives the elapsed time since the
/// previous frame. This is the only source of simulation time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    delta_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock that has not seen a frame yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to a new timestamp (milliseconds) and return the delta in seconds.
    ///
    /// The first frame reports a delta of zero. Timestamps that go backwards
    /// are treated as zero elapsed time.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let now = timestamp_ms * 0.001;
        let delta = self
            .last_timestamp
            .map_or(0.0, |previous| (now - previous).max(0.0));

        self.last_timestamp = Some(now);
        self.delta_time = delta as f32;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> Option<f32> {
        (self.delta_time > 0.0).then(|| 1.0 / self.delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.0), 0.0);
        assert!(clock.current_fps().is_none());
    }

    #[test]
    fn delta_is_measured_in_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let delta = clock.tick(1016.0);

        assert_relative_eq!(delta, 0.016, epsilon = 1e-6);
        assert_relative_eq!(clock.current_fps().unwrap_or_default(), 62.5, epsilon = 1e-2);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn backwards_timestamp_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), 0.0);
    }
}
