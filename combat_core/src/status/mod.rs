//! Status - blindness, corrosion and immunity for one entity

mod blindness;
mod corrosion;
mod immunity;

pub use blindness::{BlindnessParams, BlindnessState, BlindnessTick};
pub use corrosion::{CorrosionParams, CorrosionState, CorrosionTick};
pub use immunity::ImmunityState;

use crate::types::{EffectApplication, EffectOutcome};
use serde::{Deserialize, Serialize};

/// Tuning for a complete status state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusParams {
    #[serde(default)]
    pub blindness: BlindnessParams,
    #[serde(default)]
    pub corrosion: CorrosionParams,
}

/// Everything the sub-machines reported for one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTickEvents {
    /// The blinded flag cleared this tick
    pub blindness_recovered: bool,
    /// The blindness cooldown ended this tick
    pub blindness_ready: bool,
    /// Corrosion damage events due this tick
    pub corrosion_damage_events: u32,
    /// The corrosion window ran out this tick
    pub corrosion_expired: bool,
    /// The immunity window closed this tick
    pub immunity_expired: bool,
}

/// Status sub-machines for one entity, advanced together on the fixed tick.
/// Immunity gates every incoming effect before the sub-machines see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusState {
    blindness: BlindnessState,
    corrosion: CorrosionState,
    immunity: ImmunityState,
}

impl StatusState {
    pub fn new(params: StatusParams) -> Self {
        StatusState {
            blindness: BlindnessState::new(params.blindness),
            corrosion: CorrosionState::new(params.corrosion),
            immunity: ImmunityState::new(),
        }
    }

    pub fn blindness(&self) -> &BlindnessState {
        &self.blindness
    }

    pub fn corrosion(&self) -> &CorrosionState {
        &self.corrosion
    }

    pub fn is_blinded(&self) -> bool {
        self.blindness.is_blinded()
    }

    pub fn is_corroded(&self) -> bool {
        self.corrosion.is_corroded()
    }

    pub fn is_immune(&self) -> bool {
        self.immunity.is_immune()
    }

    /// Health removed per corrosion damage event; the owning entity applies
    /// this for each event reported by [`StatusState::tick`].
    pub fn corrosion_damage(&self) -> i32 {
        self.corrosion.damage_per_event()
    }

    /// Accumulate blindness. No-op while immune. Returns `true` on the call
    /// that tripped the blinded flag.
    pub fn increase_blindness_level(&mut self, amount: f64) -> bool {
        if self.immunity.is_immune() {
            return false;
        }
        self.blindness.increase(amount)
    }

    /// Extend the corrosion window. No-op while immune. Returns `true` on
    /// the call that opened the window.
    pub fn increase_corrosion_time(&mut self, seconds: f64) -> bool {
        if self.immunity.is_immune() {
            return false;
        }
        self.corrosion.extend(seconds)
    }

    /// Open a temporary immunity window; ignored while one is running.
    pub fn set_immunity_temporarily(&mut self, duration: f64) -> bool {
        self.immunity.set_temporarily(duration)
    }

    /// Route one effect application through the immunity gate to the right
    /// sub-machine, reporting what happened to it.
    pub fn apply(&mut self, effect: &EffectApplication) -> EffectOutcome {
        if self.immunity.is_immune() {
            return EffectOutcome::BlockedByImmunity;
        }
        match effect {
            EffectApplication::Blindness { amount } => {
                if !self.blindness.can_be_blinded() {
                    EffectOutcome::Ignored
                } else {
                    self.blindness.increase(*amount);
                    EffectOutcome::Applied
                }
            }
            EffectApplication::Corrosion { seconds } => {
                self.corrosion.extend(*seconds);
                EffectOutcome::Applied
            }
        }
    }

    /// Advance every sub-machine by one fixed tick.
    pub fn tick(&mut self, delta: f64) -> StatusTickEvents {
        let blindness = self.blindness.tick(delta);
        let corrosion = self.corrosion.tick(delta);
        let immunity_expired = self.immunity.tick(delta);
        StatusTickEvents {
            blindness_recovered: blindness.recovered,
            blindness_ready: blindness.ready,
            corrosion_damage_events: corrosion.damage_events,
            corrosion_expired: corrosion.expired,
            immunity_expired,
        }
    }
}
