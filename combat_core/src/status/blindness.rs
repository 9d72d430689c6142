//! Blindness - accumulation, decay and cooldown state machine

use crate::timer::Countdown;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning for the blindness machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindnessParams {
    /// Level at which the blinded flag trips
    pub max_level: f64,
    /// Fraction of every increment shrugged off, in [0, 1]
    #[serde(default)]
    pub resistance: f64,
    /// Seconds the blinded flag holds before the drain gate is considered
    pub duration: f64,
    /// Level lost per second, every tick, in every phase
    pub decrement_speed: f64,
    /// Seconds after recovery before the level can trip the flag again
    pub cooldown: f64,
}

impl Default for BlindnessParams {
    fn default() -> Self {
        BlindnessParams {
            max_level: 100.0,
            resistance: 0.0,
            duration: 3.0,
            decrement_speed: 10.0,
            cooldown: 5.0,
        }
    }
}

/// Recovery sequence after the flag trips: hold the flag for its duration,
/// then wait for the level to drain to zero, then run the cooldown before
/// the machine can trip again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
enum Phase {
    Idle,
    Flagged { timer: Countdown },
    Draining,
    Cooldown { timer: Countdown },
}

/// What a single tick of the machine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlindnessTick {
    /// The blinded flag cleared this tick (duration elapsed and level drained)
    pub recovered: bool,
    /// The cooldown ended this tick; the machine can trip again
    pub ready: bool,
}

/// Blindness level and flag for one entity.
///
/// The blinded flag only ever trips through [`BlindnessState::increase`]
/// reaching max level; there is no way to set it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindnessState {
    params: BlindnessParams,
    level: f64,
    blinded: bool,
    can_be_blinded: bool,
    phase: Phase,
}

impl BlindnessState {
    pub fn new(params: BlindnessParams) -> Self {
        BlindnessState {
            params,
            level: 0.0,
            blinded: false,
            can_be_blinded: true,
            phase: Phase::Idle,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn max_level(&self) -> f64 {
        self.params.max_level
    }

    pub fn is_blinded(&self) -> bool {
        self.blinded
    }

    pub fn can_be_blinded(&self) -> bool {
        self.can_be_blinded
    }

    /// Accumulate blindness. No-op unless the machine is receptive.
    /// The increment is scaled by `1 - resistance` and the level saturates
    /// at max; reaching max trips the blinded flag and starts the recovery
    /// sequence. Returns `true` on the call that tripped the flag.
    pub fn increase(&mut self, amount: f64) -> bool {
        if !self.can_be_blinded {
            return false;
        }
        let resistance = self.params.resistance.clamp(0.0, 1.0);
        let scaled = amount.max(0.0) * (1.0 - resistance);
        self.level = (self.level + scaled).min(self.params.max_level);

        if self.level >= self.params.max_level && !self.blinded {
            self.blinded = true;
            self.can_be_blinded = false;
            self.phase = Phase::Flagged {
                timer: Countdown::new(self.params.duration),
            };
            debug!(level = self.level, "blindness tripped");
            return true;
        }
        false
    }

    /// Advance the machine by one fixed tick. The level decays in every
    /// phase; the recovery sequence advances Flagged -> Draining ->
    /// Cooldown -> Idle.
    pub fn tick(&mut self, delta: f64) -> BlindnessTick {
        self.level = (self.level - self.params.decrement_speed * delta)
            .clamp(0.0, self.params.max_level);

        let mut events = BlindnessTick::default();
        match &mut self.phase {
            Phase::Idle => {}
            Phase::Flagged { timer } => {
                if timer.tick(delta) {
                    self.phase = Phase::Draining;
                }
            }
            Phase::Draining => {
                if self.level <= 0.0 {
                    self.blinded = false;
                    events.recovered = true;
                    self.phase = Phase::Cooldown {
                        timer: Countdown::new(self.params.cooldown),
                    };
                    debug!("blindness flag cleared, cooldown started");
                }
            }
            Phase::Cooldown { timer } => {
                if timer.tick(delta) {
                    self.can_be_blinded = true;
                    events.ready = true;
                    self.phase = Phase::Idle;
                }
            }
        }
        events
    }
}
