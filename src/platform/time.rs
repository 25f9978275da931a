//! Frame timing

/// Turns host timestamps into per-tick elapsed time
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_elapsed_ms: f32,
}

impl FrameClock {
    pub fn new(max_elapsed_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_elapsed_ms: max_elapsed_ms.max(0.0),
        }
    }

    /// Elapsed ms since the previous call. The first call, a clock that went
    /// backwards, or a non-finite timestamp all give 0; long stalls are capped.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }

        let elapsed = match self.last_ms {
            Some(last) if now_ms > last => (now_ms - last) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        elapsed.min(self.max_elapsed_ms)
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(100.0);
        assert_eq!(clock.advance(5000.0), 0.0);
        assert_eq!(clock.advance(5016.0), 16.0);
    }

    #[test]
    fn test_stalls_are_capped() {
        let mut clock = FrameClock::new(100.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(2500.0), 100.0);
    }

    #[test]
    fn test_bad_timestamps() {
        let mut clock = FrameClock::new(100.0);
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.advance(910.0), 10.0);

        clock.reset();
        assert_eq!(clock.advance(2000.0), 0.0);
    }
}
