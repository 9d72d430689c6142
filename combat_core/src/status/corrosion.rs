//! Corrosion - a saturating damage-over-time window

use crate::timer::IntervalTimer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning for the corrosion machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrosionParams {
    /// Ceiling on the remaining corrosion time
    pub max_time: f64,
    /// Health removed per damage event
    pub damage: i32,
    /// Seconds between damage events while corroded
    pub damage_interval: f64,
}

impl Default for CorrosionParams {
    fn default() -> Self {
        CorrosionParams {
            max_time: 10.0,
            damage: 2,
            damage_interval: 1.0,
        }
    }
}

/// What a single tick of the machine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrosionTick {
    /// Damage events due this tick; the owning entity applies
    /// [`CorrosionState::damage_per_event`] health loss for each
    pub damage_events: u32,
    /// The window ran out this tick
    pub expired: bool,
}

/// Remaining corrosion time for one entity. Corroded is a derived fact:
/// the window is open whenever time remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrosionState {
    params: CorrosionParams,
    time_left: f64,
    interval: IntervalTimer,
}

impl CorrosionState {
    pub fn new(params: CorrosionParams) -> Self {
        let interval = IntervalTimer::new(params.damage_interval);
        CorrosionState {
            params,
            time_left: 0.0,
            interval,
        }
    }

    pub fn is_corroded(&self) -> bool {
        self.time_left > 0.0
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn max_time(&self) -> f64 {
        self.params.max_time
    }

    pub fn damage_per_event(&self) -> i32 {
        self.params.damage
    }

    /// Add seconds to the window, saturating at `max_time`. Extending an
    /// already-open window is allowed. Negative increments are treated as
    /// zero. Returns `true` on the call that opened the window.
    pub fn extend(&mut self, seconds: f64) -> bool {
        let was_corroded = self.is_corroded();
        self.time_left = (self.time_left + seconds.max(0.0)).min(self.params.max_time);
        let entered = !was_corroded && self.is_corroded();
        if entered {
            self.interval.reset();
            debug!(time_left = self.time_left, "corrosion window opened");
        }
        entered
    }

    /// Advance the window by one fixed tick. While open, the interval timer
    /// accumulates damage events for the owner to apply.
    pub fn tick(&mut self, delta: f64) -> CorrosionTick {
        if !self.is_corroded() {
            return CorrosionTick::default();
        }
        let damage_events = self.interval.tick(delta);
        self.time_left = (self.time_left - delta).clamp(0.0, self.params.max_time);

        let expired = !self.is_corroded();
        if expired {
            debug!("corrosion window closed");
        }
        CorrosionTick {
            damage_events,
            expired,
        }
    }
}
