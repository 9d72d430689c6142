//! Projectiles - spec templates, the registry, and live one-shot instances

use crate::combat::{resolve_impact, ImpactPayload, ImpactResult};
use crate::damage::ChargeCurve;
use crate::entity::CombatTarget;
use crate::timer::Countdown;
use crate::types::EffectApplication;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Spawnable projectile template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Unique identifier (e.g. "bolt", "acid_flask")
    pub id: String,
    /// Display name
    pub name: String,
    /// Power for an uncharged release
    pub power: i32,
    /// Seconds before the projectile despawns on its own
    #[serde(default = "default_lifetime")]
    pub lifetime: f64,
    /// Charge scaling; `None` means the projectile cannot be charged
    #[serde(default)]
    pub charge: Option<ChargeCurve>,
    /// Additional effects applied after the damage lands
    #[serde(default)]
    pub effects: Vec<EffectApplication>,
}

fn default_lifetime() -> f64 {
    5.0
}

impl ProjectileSpec {
    /// Power released after holding the charge for `charge_time` seconds.
    /// Specs without a charge curve release their base power regardless.
    pub fn power_at(&self, charge_time: f64) -> i32 {
        match &self.charge {
            Some(curve) => curve.power_at(charge_time),
            None => self.power,
        }
    }
}

/// A live projectile. One-shot: the first impact consumes it, and further
/// collisions on the same instance are ignored, so simultaneous contacts
/// cannot double-apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    spec_id: String,
    payload: ImpactPayload,
    lifetime: Countdown,
    resolved: bool,
}

impl Projectile {
    /// Spawn with an uncharged release.
    pub fn spawn(spec: &ProjectileSpec) -> Self {
        Self::spawn_charged(spec, 0.0)
    }

    /// Spawn with `charge_time` seconds of held charge behind it.
    pub fn spawn_charged(spec: &ProjectileSpec, charge_time: f64) -> Self {
        let payload = ImpactPayload {
            power: spec.power_at(charge_time),
            effects: spec.effects.clone(),
        };
        debug!(spec = %spec.id, power = payload.power, "projectile spawned");
        Projectile {
            spec_id: spec.id.clone(),
            payload,
            lifetime: Countdown::new(spec.lifetime),
            resolved: false,
        }
    }

    pub fn spec_id(&self) -> &str {
        &self.spec_id
    }

    pub fn power(&self) -> i32 {
        self.payload.power
    }

    /// Whether this projectile has already hit something or timed out.
    pub fn is_spent(&self) -> bool {
        self.resolved
    }

    /// Resolve this projectile against a target. Returns `None` if the
    /// projectile was already spent; the latch is set before resolution, so
    /// a second simultaneous contact can never double-apply.
    pub fn impact(
        &mut self,
        attacker_attack: i32,
        target: &mut dyn CombatTarget,
    ) -> Option<ImpactResult> {
        if self.resolved {
            return None;
        }
        self.resolved = true;
        Some(resolve_impact(&self.payload, attacker_attack, target))
    }

    /// Advance the lifetime. Returns `true` on the tick the projectile
    /// times out; a timed-out projectile is spent and should be despawned.
    pub fn tick(&mut self, delta: f64) -> bool {
        if self.resolved {
            return false;
        }
        let expired = self.lifetime.tick(delta);
        if expired {
            self.resolved = true;
            debug!(spec = %self.spec_id, "projectile expired");
        }
        expired
    }
}

/// Projectile template registry, keyed by spec id.
#[derive(Debug, Clone)]
pub struct ProjectileRegistry {
    specs: HashMap<String, ProjectileSpec>,
    fallback: ProjectileSpec,
}

impl ProjectileRegistry {
    /// Create an empty registry. Unknown keys resolve to a plain low-power
    /// bolt so a missing entry degrades instead of failing.
    pub fn new() -> Self {
        ProjectileRegistry {
            specs: HashMap::new(),
            fallback: ProjectileSpec {
                id: "fallback_bolt".to_string(),
                name: "Bolt".to_string(),
                power: 5,
                lifetime: default_lifetime(),
                charge: None,
                effects: Vec::new(),
            },
        }
    }

    /// Register a projectile template
    pub fn register(&mut self, spec: ProjectileSpec) {
        self.specs.insert(spec.id.clone(), spec);
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Option<&ProjectileSpec> {
        self.specs.get(id)
    }

    /// Get a template by id, or the fallback bolt for unknown keys.
    pub fn spec_or_default(&self, id: &str) -> &ProjectileSpec {
        self.specs.get(id).unwrap_or(&self.fallback)
    }

    /// Registered template ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Load default projectile types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProjectileSpec {
            id: "bolt".to_string(),
            name: "Bolt".to_string(),
            power: 10,
            lifetime: 5.0,
            charge: None,
            effects: Vec::new(),
        });

        registry.register(ProjectileSpec {
            id: "charged_arrow".to_string(),
            name: "Charged Arrow".to_string(),
            power: 10,
            lifetime: 5.0,
            charge: Some(ChargeCurve {
                base_power: 10,
                max_power: 60,
                full_charge_time: 2.0,
            }),
            effects: Vec::new(),
        });

        registry.register(ProjectileSpec {
            id: "acid_flask".to_string(),
            name: "Acid Flask".to_string(),
            power: 4,
            lifetime: 3.0,
            charge: None,
            effects: vec![EffectApplication::Corrosion { seconds: 4.0 }],
        });

        registry.register(ProjectileSpec {
            id: "flash_bomb".to_string(),
            name: "Flash Bomb".to_string(),
            power: 2,
            lifetime: 3.0,
            charge: None,
            effects: vec![EffectApplication::Blindness { amount: 40.0 }],
        });

        registry
    }
}

impl Default for ProjectileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Character;
    use crate::health::HealthState;
    use crate::stats::{Stat, StatBlock};
    use crate::status::{StatusParams, StatusState};

    fn make_target() -> Character {
        Character::new(
            "dummy",
            "Dummy",
            HealthState::new(100),
            StatBlock::new(
                Stat::new(5, 1, 100),
                Stat::new(5, 1, 100),
                Stat::new(5, 1, 100),
            ),
            StatusState::new(StatusParams::default()),
        )
    }

    #[test]
    fn test_impact_is_one_shot() {
        let registry = ProjectileRegistry::with_defaults();
        let mut projectile = Projectile::spawn(registry.spec_or_default("bolt"));
        let mut target = make_target();

        let first = projectile.impact(20, &mut target);
        assert!(first.is_some());
        assert!(projectile.is_spent());

        let health_after_first = target.health_state().current();
        // A second simultaneous contact resolves to nothing
        assert!(projectile.impact(20, &mut target).is_none());
        assert_eq!(target.health_state().current(), health_after_first);
    }

    #[test]
    fn test_charge_scales_power() {
        let registry = ProjectileRegistry::with_defaults();
        let spec = registry.spec_or_default("charged_arrow");

        assert_eq!(Projectile::spawn(spec).power(), 10);
        assert_eq!(Projectile::spawn_charged(spec, 1.0).power(), 35);
        assert_eq!(Projectile::spawn_charged(spec, 10.0).power(), 60);
    }

    #[test]
    fn test_uncharged_spec_ignores_charge_time() {
        let registry = ProjectileRegistry::with_defaults();
        let spec = registry.spec_or_default("bolt");
        assert_eq!(Projectile::spawn_charged(spec, 10.0).power(), 10);
    }

    #[test]
    fn test_lifetime_expiry_spends_projectile() {
        let registry = ProjectileRegistry::with_defaults();
        let mut projectile = Projectile::spawn(registry.spec_or_default("acid_flask"));

        assert!(!projectile.tick(2.5));
        assert!(projectile.tick(0.5));
        assert!(projectile.is_spent());

        let mut target = make_target();
        assert!(projectile.impact(20, &mut target).is_none());
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let registry = ProjectileRegistry::with_defaults();
        assert!(registry.get("no_such_projectile").is_none());

        let spec = registry.spec_or_default("no_such_projectile");
        assert_eq!(spec.id, "fallback_bolt");
        let mut target = make_target();
        let result = Projectile::spawn(spec).impact(20, &mut target);
        assert!(result.is_some());
    }

    #[test]
    fn test_payload_effects_carried() {
        let registry = ProjectileRegistry::with_defaults();
        let mut projectile = Projectile::spawn(registry.spec_or_default("acid_flask"));
        let mut target = make_target();

        let result = projectile.impact(10, &mut target).unwrap();
        assert_eq!(result.effects_applied(), 1);
        assert!(target.status_state().is_corroded());
    }
}
