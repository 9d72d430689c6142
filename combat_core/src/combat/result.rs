//! ImpactResult - outcome of resolving one impact

use crate::types::{EffectApplication, EffectOutcome};
use serde::{Deserialize, Serialize};

/// Result of resolving an impact payload against a target.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactResult {
    /// Defence the formula ran against (the fallback if the target had no
    /// stats capability)
    pub defence_used: i32,
    /// Damage the formula produced
    pub damage_rolled: i32,
    /// Health actually removed (zero for invincible or health-less targets)
    pub damage_dealt: i32,
    /// This impact emptied the target's health
    pub target_killed: bool,
    /// Per-effect outcomes, in payload order
    pub effects: Vec<(EffectApplication, EffectOutcome)>,
}

impl ImpactResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many payload effects reached the target.
    pub fn effects_applied(&self) -> usize {
        self.effects
            .iter()
            .filter(|(_, outcome)| *outcome == EffectOutcome::Applied)
            .count()
    }

    /// Whether the target's immunity blocked any payload effect.
    pub fn blocked_by_immunity(&self) -> bool {
        self.effects
            .iter()
            .any(|(_, outcome)| *outcome == EffectOutcome::BlockedByImmunity)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.damage_dealt > 0 {
            parts.push(format!("{} damage", self.damage_dealt));
        }
        for (effect, outcome) in &self.effects {
            if *outcome == EffectOutcome::Applied {
                parts.push(effect.name().to_lowercase());
            }
        }
        if self.blocked_by_immunity() {
            parts.push("immune".to_string());
        }
        if self.target_killed {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No effect".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_applied_count() {
        let mut result = ImpactResult::new();
        result.effects.push((
            EffectApplication::Blindness { amount: 10.0 },
            EffectOutcome::Applied,
        ));
        result.effects.push((
            EffectApplication::Corrosion { seconds: 2.0 },
            EffectOutcome::BlockedByImmunity,
        ));

        assert_eq!(result.effects_applied(), 1);
        assert!(result.blocked_by_immunity());
    }

    #[test]
    fn test_summary_fatal() {
        let mut result = ImpactResult::new();
        result.damage_dealt = 42;
        result.target_killed = true;

        let summary = result.summary();
        assert!(summary.contains("42 damage"));
        assert!(summary.contains("FATAL"));
    }

    #[test]
    fn test_summary_no_effect() {
        assert_eq!(ImpactResult::new().summary(), "No effect");
    }
}
