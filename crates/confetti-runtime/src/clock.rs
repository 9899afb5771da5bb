//! Frame clock anchored at the first frame of a burst

/// Tracks the logical start of a burst and elapsed time from frame timestamps
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    /// Timestamp of the first frame (ms)
    start: Option<f64>,
    /// Elapsed time at the most recent frame (ms)
    elapsed: f64,
    /// Frames ticked so far
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame. The first timestamp becomes the logical start.
    /// Returns elapsed milliseconds since then.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let start = *self.start.get_or_insert(timestamp_ms);
        self.frames += 1;
        // Hosts may hand out slightly out-of-order timestamps
        self.elapsed = (timestamp_ms - start).max(0.0);
        self.elapsed
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_sets_start() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.start(), None);
        assert_eq!(clock.tick(500.0), 0.0);
        assert_eq!(clock.start(), Some(500.0));
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn elapsed_from_first_frame() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        clock.tick(1016.0);
        assert!((clock.tick(1033.5) - 33.5).abs() < 1e-9);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn backwards_timestamp_clamps() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(90.0), 0.0);
    }
}
