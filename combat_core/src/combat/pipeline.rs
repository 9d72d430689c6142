//! Impact resolution - the path every projectile and offensive item takes

use super::result::ImpactResult;
use crate::damage::compute_damage;
use crate::entity::CombatTarget;
use crate::types::{EffectApplication, EffectOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Defence assumed for targets without a stats capability.
pub const DEFAULT_TARGET_DEFENCE: i32 = 1;

/// What an impact carries: resolved power plus the additional effects to
/// apply after the damage lands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactPayload {
    pub power: i32,
    #[serde(default)]
    pub effects: Vec<EffectApplication>,
}

impl ImpactPayload {
    pub fn new(power: i32) -> Self {
        ImpactPayload {
            power,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: EffectApplication) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Resolve an impact against a target through its capability handles.
///
/// Defence comes from the target's stats capability, falling back to
/// [`DEFAULT_TARGET_DEFENCE`]; damage goes through the formula and the
/// health capability; each payload effect is then routed through the
/// target's status capability, which enforces immunity and receptiveness.
/// Targets without a given capability simply skip that step.
pub fn resolve_impact(
    payload: &ImpactPayload,
    attacker_attack: i32,
    target: &mut dyn CombatTarget,
) -> ImpactResult {
    let mut result = ImpactResult::new();

    result.defence_used = target
        .stats()
        .map(|stats| stats.defence.current_value())
        .unwrap_or(DEFAULT_TARGET_DEFENCE);
    result.damage_rolled = compute_damage(payload.power, attacker_attack, result.defence_used);

    if let Some(health) = target.health_mut() {
        let outcome = health.decrease(result.damage_rolled);
        result.damage_dealt = outcome.dealt;
        result.target_killed = outcome.lethal;
    }

    for effect in &payload.effects {
        let outcome = match target.status_mut() {
            Some(status) => status.apply(effect),
            None => EffectOutcome::MissingCapability,
        };
        result.effects.push((*effect, outcome));
    }

    debug!(
        power = payload.power,
        attack = attacker_attack,
        defence = result.defence_used,
        dealt = result.damage_dealt,
        killed = result.target_killed,
        "impact resolved"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Character;
    use crate::health::HealthState;
    use crate::stats::{Stat, StatBlock};
    use crate::status::{StatusParams, StatusState};

    fn make_target(defence: i32, max_health: i32) -> Character {
        Character::new(
            "dummy",
            "Dummy",
            HealthState::new(max_health),
            StatBlock::new(
                Stat::new(5, 1, 100),
                Stat::new(defence, 1, 100),
                Stat::new(5, 1, 100),
            ),
            StatusState::new(StatusParams::default()),
        )
    }

    /// Something with no components at all, e.g. a destructible crate.
    struct Scenery;
    impl CombatTarget for Scenery {}

    #[test]
    fn test_damage_flows_to_health() {
        let mut target = make_target(50, 500);
        let payload = ImpactPayload::new(100);

        // Attack 300 vs defence 50: log3(251) -> 502, capped by health
        let result = resolve_impact(&payload, 300, &mut target);
        assert_eq!(result.defence_used, 50);
        assert_eq!(result.damage_rolled, 502);
        assert_eq!(result.damage_dealt, 500);
        assert!(result.target_killed);
    }

    #[test]
    fn test_effects_follow_damage() {
        let mut target = make_target(5, 100);
        let payload = ImpactPayload::new(10)
            .with_effect(EffectApplication::Blindness { amount: 30.0 })
            .with_effect(EffectApplication::Corrosion { seconds: 2.0 });

        let result = resolve_impact(&payload, 10, &mut target);
        assert_eq!(result.effects_applied(), 2);
        assert!(target.status_state().is_corroded());
        assert!(target.status_state().blindness().level() > 0.0);
    }

    #[test]
    fn test_immunity_blocks_effects_not_damage() {
        let mut target = make_target(5, 100);
        target.status_state_mut().set_immunity_temporarily(5.0);

        let payload =
            ImpactPayload::new(10).with_effect(EffectApplication::Corrosion { seconds: 2.0 });
        let result = resolve_impact(&payload, 10, &mut target);

        assert!(result.damage_dealt > 0);
        assert!(result.blocked_by_immunity());
        assert!(!target.status_state().is_corroded());
    }

    #[test]
    fn test_capability_free_target_uses_fallback_defence() {
        let mut scenery = Scenery;
        let payload =
            ImpactPayload::new(10).with_effect(EffectApplication::Blindness { amount: 5.0 });
        let result = resolve_impact(&payload, 10, &mut scenery);

        assert_eq!(result.defence_used, DEFAULT_TARGET_DEFENCE);
        // Damage is rolled but nothing can take it
        assert!(result.damage_rolled > 0);
        assert_eq!(result.damage_dealt, 0);
        assert_eq!(
            result.effects,
            vec![(
                EffectApplication::Blindness { amount: 5.0 },
                EffectOutcome::MissingCapability
            )]
        );
    }
}
