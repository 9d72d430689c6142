//! Characters and the capability seams the combat pipeline works through

use crate::config::CharacterConfig;
use crate::health::HealthState;
use crate::stats::{Stat, StatBlock};
use crate::status::{StatusState, StatusTickEvents};
use serde::{Deserialize, Serialize};

/// Capability lookup for anything a projectile or item can hit.
///
/// Entities implement only the accessors for the components they actually
/// carry; the defaults report the capability as absent. The combat pipeline
/// queries these instead of assuming any concrete entity type.
pub trait CombatTarget {
    fn stats(&self) -> Option<&StatBlock> {
        None
    }
    fn stats_mut(&mut self) -> Option<&mut StatBlock> {
        None
    }
    fn health(&self) -> Option<&HealthState> {
        None
    }
    fn health_mut(&mut self) -> Option<&mut HealthState> {
        None
    }
    fn status(&self) -> Option<&StatusState> {
        None
    }
    fn status_mut(&mut self) -> Option<&mut StatusState> {
        None
    }
}

/// Everything one fixed tick did to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterTick {
    /// The character died this tick (from corrosion damage)
    pub died: bool,
    /// Health removed by corrosion damage events this tick
    pub corrosion_damage: i32,
    /// A temporary stat change expired and was reverted this tick
    pub stats_reverted: bool,
    /// What the status sub-machines reported
    pub status: StatusTickEvents,
}

/// A player or mob: health, stats and status composed one-to-one.
///
/// The character owns the fixed-tick wiring between its components; in
/// particular, corrosion damage events reported by the status state are
/// applied to its own health here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    health: HealthState,
    stats: StatBlock,
    status: StatusState,
}

impl Character {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        health: HealthState,
        stats: StatBlock,
        status: StatusState,
    ) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            health,
            stats,
            status,
        }
    }

    /// Build a character from an archetype configuration.
    pub fn from_config(config: &CharacterConfig) -> Self {
        let mut health = HealthState::new(config.max_health);
        health.set_invincible(config.invincible);

        let stats = StatBlock::new(
            Stat::new(config.attack.standard, config.attack.min, config.attack.max),
            Stat::new(
                config.defence.standard,
                config.defence.min,
                config.defence.max,
            ),
            Stat::new(config.speed.standard, config.speed.min, config.speed.max),
        );
        let status = StatusState::new(config.status.clone());

        Character::new(config.id.clone(), config.name.clone(), health, stats, status)
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn health_state(&self) -> &HealthState {
        &self.health
    }

    pub fn health_state_mut(&mut self) -> &mut HealthState {
        &mut self.health
    }

    pub fn stat_block(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stat_block_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn status_state(&self) -> &StatusState {
        &self.status
    }

    pub fn status_state_mut(&mut self) -> &mut StatusState {
        &mut self.status
    }

    /// Advance all timed state by one fixed tick: stat reversion and the
    /// status sub-machines first, then corrosion damage events are applied
    /// to this character's own health.
    pub fn fixed_tick(&mut self, delta: f64) -> CharacterTick {
        let stats_reverted = self.stats.tick(delta);
        let status = self.status.tick(delta);

        let mut corrosion_damage = 0;
        let mut died = false;
        for _ in 0..status.corrosion_damage_events {
            let outcome = self.health.decrease(self.status.corrosion_damage());
            corrosion_damage += outcome.dealt;
            died |= outcome.lethal;
        }

        CharacterTick {
            died,
            corrosion_damage,
            stats_reverted,
            status,
        }
    }
}

impl CombatTarget for Character {
    fn stats(&self) -> Option<&StatBlock> {
        Some(&self.stats)
    }

    fn stats_mut(&mut self) -> Option<&mut StatBlock> {
        Some(&mut self.stats)
    }

    fn health(&self) -> Option<&HealthState> {
        Some(&self.health)
    }

    fn health_mut(&mut self) -> Option<&mut HealthState> {
        Some(&mut self.health)
    }

    fn status(&self) -> Option<&StatusState> {
        Some(&self.status)
    }

    fn status_mut(&mut self) -> Option<&mut StatusState> {
        Some(&mut self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{CorrosionParams, StatusParams};

    fn make_character() -> Character {
        let status = StatusParams {
            corrosion: CorrosionParams {
                max_time: 10.0,
                damage: 5,
                damage_interval: 1.0,
            },
            ..StatusParams::default()
        };
        Character::new(
            "target",
            "Target",
            HealthState::new(20),
            StatBlock::new(
                Stat::new(10, 1, 100),
                Stat::new(5, 1, 100),
                Stat::new(5, 1, 100),
            ),
            StatusState::new(status),
        )
    }

    #[test]
    fn test_corrosion_damage_applied_on_tick() {
        let mut character = make_character();
        character.status_state_mut().increase_corrosion_time(3.0);

        let mut total = 0;
        for _ in 0..12 {
            total += character.fixed_tick(0.25).corrosion_damage;
        }
        // 3 events at 5 damage each
        assert_eq!(total, 15);
        assert_eq!(character.health_state().current(), 5);
    }

    #[test]
    fn test_corrosion_can_kill() {
        let mut character = make_character();
        character.status_state_mut().increase_corrosion_time(10.0);

        let mut died = false;
        for _ in 0..40 {
            died |= character.fixed_tick(0.25).died;
        }
        assert!(died);
        assert!(!character.is_alive());
    }

    #[test]
    fn test_stat_revert_reported() {
        let mut character = make_character();
        character
            .stat_block_mut()
            .temporarily_change_stats(2.0, 2.0, 0.5);

        assert!(!character.fixed_tick(0.25).stats_reverted);
        assert!(character.fixed_tick(0.25).stats_reverted);
        assert_eq!(character.stat_block().attack.current_value(), 10);
    }

    #[test]
    fn test_capabilities_all_present() {
        let mut character = make_character();
        assert!(CombatTarget::stats(&character).is_some());
        assert!(CombatTarget::health(&character).is_some());
        assert!(CombatTarget::status_mut(&mut character).is_some());
    }

    #[test]
    fn test_from_config_defaults() {
        let config: CharacterConfig = toml::from_str(
            r#"
id = "mob"
name = "Mob"
max_health = 30
attack = { standard = 4 }
defence = { standard = 2 }
speed = { standard = 3 }
"#,
        )
        .unwrap();

        let character = Character::from_config(&config);
        assert_eq!(character.health_state().max(), 30);
        assert_eq!(character.stat_block().attack.current_value(), 4);
        assert!(character.is_alive());
    }
}
