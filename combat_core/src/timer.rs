//! Explicit timers driven by the fixed simulation tick
//!
//! Every delayed or staged behavior in the engine (blindness recovery,
//! temporary stat reversion, immunity windows, projectile lifetimes,
//! corrosion damage intervals) is expressed as one of these per-instance
//! timers advanced once per tick. There are no threads and no suspended
//! tasks anywhere in the crate.

use serde::{Deserialize, Serialize};

/// One-shot countdown. Fires exactly once, on the tick its time runs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f64,
    finished: bool,
}

impl Countdown {
    /// Start a countdown. Negative durations are treated as zero, which
    /// makes the countdown fire on the next tick.
    pub fn new(duration: f64) -> Self {
        Countdown {
            remaining: duration.max(0.0),
            finished: false,
        }
    }

    /// Advance by `delta` seconds. Returns `true` exactly on the tick the
    /// countdown finishes; `false` before that and on every tick after.
    pub fn tick(&mut self, delta: f64) -> bool {
        if self.finished {
            return false;
        }
        self.remaining -= delta.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.finished = true;
            true
        } else {
            false
        }
    }

    /// Whether the countdown has run out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time left in seconds.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

/// Repeating timer with catch-up: a large `delta` yields multiple firings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    interval: f64,
    until_next: f64,
}

impl IntervalTimer {
    /// Create a repeating timer. A non-positive interval disables the
    /// timer entirely (it never fires).
    pub fn new(interval: f64) -> Self {
        IntervalTimer {
            interval,
            until_next: interval,
        }
    }

    /// Advance by `delta` seconds and return how many intervals elapsed.
    pub fn tick(&mut self, delta: f64) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.until_next -= delta.max(0.0);
        let mut fired = 0;
        while self.until_next <= 0.0 {
            fired += 1;
            self.until_next += self.interval;
        }
        fired
    }

    /// Restart the wait for the next firing from a full interval.
    pub fn reset(&mut self) {
        self.until_next = self.interval;
    }

    /// The configured interval in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut cd = Countdown::new(1.0);
        assert!(!cd.tick(0.4));
        assert!(!cd.tick(0.4));
        assert!(cd.tick(0.4));
        assert!(cd.is_finished());
        assert!(!cd.tick(0.4));
    }

    #[test]
    fn test_countdown_zero_duration_fires_next_tick() {
        let mut cd = Countdown::new(0.0);
        assert!(cd.tick(0.02));
        assert!(!cd.tick(0.02));
    }

    #[test]
    fn test_countdown_negative_duration_clamped() {
        let mut cd = Countdown::new(-3.0);
        assert!((cd.remaining() - 0.0).abs() < f64::EPSILON);
        assert!(cd.tick(0.02));
    }

    #[test]
    fn test_interval_timer_catch_up() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.tick(0.4), 0);
        // 0.4 + 1.7 = 2.1 elapsed -> firings at 0.5, 1.0, 1.5, 2.0
        assert_eq!(timer.tick(1.7), 4);
    }

    #[test]
    fn test_interval_timer_reset() {
        let mut timer = IntervalTimer::new(1.0);
        timer.tick(0.9);
        timer.reset();
        assert_eq!(timer.tick(0.9), 0);
        assert_eq!(timer.tick(0.1), 1);
    }

    #[test]
    fn test_interval_timer_disabled() {
        let mut timer = IntervalTimer::new(0.0);
        assert_eq!(timer.tick(100.0), 0);
    }
}
