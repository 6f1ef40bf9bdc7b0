//! Automatic drop timing
//!
//! Not a timer thread: the frame loop reports elapsed wall-clock time and
//! the clock converts it into discrete fall ticks at a level-dependent
//! cadence.

/// Milliseconds between automatic drops at the given level.
/// Starts at 900ms and loses 70ms per level, down to a 90ms floor.
pub fn drop_interval_ms(level: u32) -> u64 {
    (900 - (i64::from(level) - 1) * 70).max(90) as u64
}

/// Accumulator converting elapsed milliseconds into drop ticks
#[derive(Debug, Clone, Default)]
pub struct DropClock {
    elapsed_ms: u64,
}

impl DropClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed time; returns true when a fall tick is due.
    ///
    /// At most one tick fires per call, and firing resets the accumulator
    /// to zero: whatever the frame overshot past the interval is discarded,
    /// not carried into the next tick.
    pub fn advance(&mut self, delta_ms: u64, interval_ms: u64) -> bool {
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= interval_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }

    /// Forget any accumulated time
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_shrinks_with_level() {
        assert_eq!(drop_interval_ms(1), 900);
        assert_eq!(drop_interval_ms(2), 830);
        assert_eq!(drop_interval_ms(12), 130);
        for level in 1..40 {
            assert!(drop_interval_ms(level + 1) <= drop_interval_ms(level));
        }
    }

    #[test]
    fn test_interval_floors_at_90() {
        assert_eq!(drop_interval_ms(13), 90);
        assert_eq!(drop_interval_ms(50), 90);
        assert_eq!(drop_interval_ms(u32::MAX), 90);
    }

    #[test]
    fn test_clock_fires_once_threshold_is_reached() {
        let mut clock = DropClock::new();
        assert!(!clock.advance(400, 900));
        assert!(!clock.advance(400, 900));
        assert!(clock.advance(400, 900));
    }

    #[test]
    fn test_overshoot_is_discarded() {
        let mut clock = DropClock::new();
        // one giant frame still yields a single tick with nothing carried
        assert!(clock.advance(5000, 900));
        assert!(!clock.advance(800, 900));
        assert!(clock.advance(100, 900));
    }

    #[test]
    fn test_reset_drops_accumulated_time() {
        let mut clock = DropClock::new();
        assert!(!clock.advance(899, 900));
        clock.reset();
        assert!(!clock.advance(899, 900));
        assert!(clock.advance(1, 900));
    }
}
