//! HealthState - bounded health with a one-shot death edge

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a single `decrease` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Health actually removed after clamping
    pub dealt: i32,
    /// Set on the one call that drove health to zero. Never set twice for
    /// the same life.
    pub lethal: bool,
}

/// Current/max health for one entity.
///
/// Invariant: `0 <= current <= max`. Once the death edge has been reported,
/// the state is dead and every mutator is a no-op until the entity is
/// despawned by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    current: i32,
    max: i32,
    invincible: bool,
    dead: bool,
}

impl HealthState {
    /// Create a state at full health. `max_health` is clamped to at least 1.
    pub fn new(max_health: i32) -> Self {
        let max = max_health.max(1);
        HealthState {
            current: max,
            max,
            invincible: false,
            dead: false,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    /// Add health, saturating at max. Negative amounts are treated as zero.
    /// Returns the health actually restored.
    pub fn increase(&mut self, amount: i32) -> i32 {
        if self.dead {
            return 0;
        }
        let amount = amount.max(0);
        let new = self.current.saturating_add(amount).min(self.max);
        let applied = new - self.current;
        self.current = new;
        applied
    }

    /// Remove health, saturating at zero. Negative amounts are treated as
    /// zero, and an invincible state ignores the call entirely. The lethal
    /// flag is reported exactly once, on the call that first empties health.
    pub fn decrease(&mut self, amount: i32) -> DamageOutcome {
        if self.dead || self.invincible {
            return DamageOutcome::default();
        }
        let amount = amount.max(0);
        let new = self.current.saturating_sub(amount).max(0);
        let dealt = self.current - new;
        self.current = new;

        let lethal = self.current == 0;
        if lethal {
            self.dead = true;
            debug!(dealt, "health emptied, death edge fired");
        }
        DamageOutcome { dealt, lethal }
    }

    /// Heal by a fraction of max health; `percentage` is clamped to [0, 1].
    pub fn increase_percentage(&mut self, percentage: f64) -> i32 {
        self.increase(self.fraction_of_max(percentage))
    }

    /// Damage by a fraction of max health; `percentage` is clamped to [0, 1].
    pub fn decrease_percentage(&mut self, percentage: f64) -> DamageOutcome {
        self.decrease(self.fraction_of_max(percentage))
    }

    /// Raise max health without healing; current health is untouched.
    pub fn increase_max_health(&mut self, amount: i32) {
        if self.dead {
            return;
        }
        self.max = self.max.saturating_add(amount.max(0));
    }

    /// Raise max health by a fraction of the current max, without healing.
    pub fn increase_max_health_percentage(&mut self, percentage: f64) {
        self.increase_max_health(self.fraction_of_max(percentage));
    }

    /// Set current health back to max. The longevity potion raises the cap
    /// and then calls this.
    pub fn restore_full(&mut self) {
        if self.dead {
            return;
        }
        self.current = self.max;
    }

    fn fraction_of_max(&self, percentage: f64) -> i32 {
        let percentage = percentage.clamp(0.0, 1.0);
        (self.max as f64 * percentage).floor() as i32
    }
}
