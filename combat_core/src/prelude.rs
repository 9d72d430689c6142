//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core components
pub use crate::health::{DamageOutcome, HealthState};
pub use crate::stats::{Stat, StatBlock};
pub use crate::status::{StatusParams, StatusState, StatusTickEvents};

// Damage and combat
pub use crate::combat::{resolve_impact, ImpactPayload, ImpactResult};
pub use crate::damage::{compute_damage, ChargeCurve};

// Entities
pub use crate::entity::{Character, CharacterTick, CombatTarget};

// Projectiles and items
pub use crate::item::{Consumable, ConsumableKind, Container, ItemError, UseOutcome};
pub use crate::projectile::{Projectile, ProjectileRegistry, ProjectileSpec};

// Shared types
pub use crate::types::{EffectApplication, EffectOutcome};

// Config
pub use crate::config::{parse_character_configs, parse_projectile_configs, ConfigError};
