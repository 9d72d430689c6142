//! StatBlock - the attack/defence/speed triple with temporary modification

use super::Stat;
use crate::timer::Countdown;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A temporary multiplicative change in flight. At most one exists at a
/// time; the ratios recorded here are divided back out when the timer runs
/// out, so multipliers applied before the change survive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TempStatChange {
    attack_ratio: f64,
    defence_ratio: f64,
    timer: Countdown,
}

/// The stats a character carries: attack and defence feed the damage
/// formula, speed belongs to the movement layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: Stat,
    pub defence: Stat,
    pub speed: Stat,
    temp_change: Option<TempStatChange>,
}

impl StatBlock {
    pub fn new(attack: Stat, defence: Stat, speed: Stat) -> Self {
        StatBlock {
            attack,
            defence,
            speed,
            temp_change: None,
        }
    }

    /// Whether a temporary change is currently in flight.
    pub fn has_temporary_change(&self) -> bool {
        self.temp_change.is_some()
    }

    /// Multiply the attack and defence multipliers for `duration` seconds,
    /// reverting by the exact inverse ratios afterwards.
    ///
    /// Returns `false` without touching anything if a temporary change is
    /// already active: changes never stack, extend, or queue. Non-positive
    /// ratios are treated as 1.0.
    pub fn temporarily_change_stats(
        &mut self,
        attack_mult: f64,
        defence_mult: f64,
        duration: f64,
    ) -> bool {
        if self.temp_change.is_some() {
            return false;
        }
        let attack_ratio = if attack_mult > 0.0 { attack_mult } else { 1.0 };
        let defence_ratio = if defence_mult > 0.0 { defence_mult } else { 1.0 };

        self.attack.scale_multiplier(attack_ratio);
        self.defence.scale_multiplier(defence_ratio);
        self.temp_change = Some(TempStatChange {
            attack_ratio,
            defence_ratio,
            timer: Countdown::new(duration),
        });
        debug!(attack_ratio, defence_ratio, duration, "temporary stat change applied");
        true
    }

    /// Advance the revert timer. Returns `true` on the tick the temporary
    /// change expired and was reverted.
    pub fn tick(&mut self, delta: f64) -> bool {
        let expired = match &mut self.temp_change {
            Some(change) => change.timer.tick(delta),
            None => return false,
        };
        if !expired {
            return false;
        }
        if let Some(change) = self.temp_change.take() {
            self.attack.scale_multiplier(1.0 / change.attack_ratio);
            self.defence.scale_multiplier(1.0 / change.defence_ratio);
            debug!("temporary stat change reverted");
        }
        true
    }

    /// Set every multiplier back to 1.0 and drop any in-flight change.
    pub fn reset(&mut self) {
        self.attack.reset();
        self.defence.reset();
        self.speed.reset();
        self.temp_change = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_block() -> StatBlock {
        StatBlock::new(
            Stat::new(10, 1, 100),
            Stat::new(8, 1, 100),
            Stat::new(5, 1, 50),
        )
    }

    #[test]
    fn test_temporary_change_applies_and_reverts() {
        let mut block = make_block();
        assert!(block.temporarily_change_stats(2.0, 0.5, 3.0));
        assert_eq!(block.attack.current_value(), 20);
        assert_eq!(block.defence.current_value(), 4);

        assert!(!block.tick(2.0));
        assert!(block.tick(1.0));
        assert_eq!(block.attack.current_value(), 10);
        assert_eq!(block.defence.current_value(), 8);
        assert!(!block.has_temporary_change());
    }

    #[test]
    fn test_reentry_refused() {
        let mut block = make_block();
        assert!(block.temporarily_change_stats(2.0, 1.0, 5.0));
        let attack_after_first = block.attack.multiplier();

        // Second call while active: ignored, multiplier unchanged
        assert!(!block.temporarily_change_stats(3.0, 3.0, 5.0));
        assert!((block.attack.multiplier() - attack_after_first).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revert_preserves_permanent_multiplier() {
        let mut block = make_block();
        // Permanent modification first
        block.attack.scale_multiplier(1.5);
        let before = block.attack.multiplier();

        block.temporarily_change_stats(2.0, 0.5, 1.0);
        block.tick(1.0);

        assert!((block.attack.multiplier() - before).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_ratio_treated_as_one() {
        let mut block = make_block();
        assert!(block.temporarily_change_stats(0.0, -2.0, 1.0));
        assert!((block.attack.multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((block.defence.multiplier() - 1.0).abs() < f64::EPSILON);
        block.tick(1.0);
        assert!((block.attack.multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_change_allowed_after_revert() {
        let mut block = make_block();
        block.temporarily_change_stats(2.0, 2.0, 1.0);
        block.tick(1.0);
        assert!(block.temporarily_change_stats(3.0, 1.0, 1.0));
        assert_eq!(block.attack.current_value(), 30);
    }

    #[test]
    fn test_reset_clears_change() {
        let mut block = make_block();
        block.temporarily_change_stats(2.0, 2.0, 10.0);
        block.reset();
        assert!(!block.has_temporary_change());
        assert_eq!(block.attack.current_value(), 10);
    }
}
