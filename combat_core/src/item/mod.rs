//! Items - consumables and the typed failures their misuse raises

mod ability;
mod container;

pub use ability::{Ability, AbilityKind, AbilityLoadout};
pub use container::{Container, Stack, Stackable};

use crate::entity::Character;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an ability could not be equipped
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnequippableReason {
    #[error("all ability slots are in use")]
    NumberExceeded,
    #[error("an ability of the same kind is already equipped")]
    DuplicateType,
}

/// Expected, recoverable item failures. The UI layer catches these at the
/// use/equip trigger point and shows them to the player; they are not bugs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemError {
    #[error("using this item would have no effect")]
    NoNeedToUseThisItem,
    #[error("ability cannot be equipped: {0}")]
    UnequippableAbility(UnequippableReason),
}

/// What a consumable does when used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsumableKind {
    /// Restore a flat amount of health
    Healing { amount: i32 },
    /// Restore a fraction of max health
    HealingPercent { percent: f64 },
    /// Raise max health, then fill to the new max
    Longevity { max_increase: i32 },
    /// Temporarily multiply attack and defence
    StatBoost {
        attack_mult: f64,
        defence_mult: f64,
        duration: f64,
    },
    /// Open a temporary immunity window
    Immunity { duration: f64 },
}

/// What a successful use did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    Healed(i32),
    MaxHealthRaised { by: i32 },
    StatsBoosted,
    ImmunityGranted,
}

/// A usable consumable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    /// Unique identifier (e.g. "health_potion")
    pub id: String,
    /// Display name
    pub name: String,
    /// How many of this item one character can hold
    #[serde(default = "default_max_holdable")]
    pub max_holdable: u32,
    pub kind: ConsumableKind,
}

fn default_max_holdable() -> u32 {
    5
}

impl Consumable {
    /// Apply this consumable to a character.
    ///
    /// An item that would change nothing (healing at full health, boosting
    /// while a boost runs, immunity while immune) fails with
    /// [`ItemError::NoNeedToUseThisItem`] and leaves the character untouched.
    pub fn use_on(&self, target: &mut Character) -> Result<UseOutcome, ItemError> {
        match &self.kind {
            ConsumableKind::Healing { amount } => {
                let healed = target.health_state_mut().increase(*amount);
                if healed == 0 {
                    return Err(ItemError::NoNeedToUseThisItem);
                }
                Ok(UseOutcome::Healed(healed))
            }
            ConsumableKind::HealingPercent { percent } => {
                let healed = target.health_state_mut().increase_percentage(*percent);
                if healed == 0 {
                    return Err(ItemError::NoNeedToUseThisItem);
                }
                Ok(UseOutcome::Healed(healed))
            }
            ConsumableKind::Longevity { max_increase } => {
                if !target.is_alive() || *max_increase <= 0 {
                    return Err(ItemError::NoNeedToUseThisItem);
                }
                let health = target.health_state_mut();
                health.increase_max_health(*max_increase);
                health.restore_full();
                Ok(UseOutcome::MaxHealthRaised { by: *max_increase })
            }
            ConsumableKind::StatBoost {
                attack_mult,
                defence_mult,
                duration,
            } => {
                let applied = target.stat_block_mut().temporarily_change_stats(
                    *attack_mult,
                    *defence_mult,
                    *duration,
                );
                if !applied {
                    return Err(ItemError::NoNeedToUseThisItem);
                }
                Ok(UseOutcome::StatsBoosted)
            }
            ConsumableKind::Immunity { duration } => {
                if !target.status_state_mut().set_immunity_temporarily(*duration) {
                    return Err(ItemError::NoNeedToUseThisItem);
                }
                Ok(UseOutcome::ImmunityGranted)
            }
        }
    }
}

impl Stackable for Consumable {
    fn stack_key(&self) -> &str {
        &self.id
    }

    fn max_holdable(&self) -> u32 {
        self.max_holdable
    }
}
