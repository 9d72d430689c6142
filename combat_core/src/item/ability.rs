//! Ability loadout - fixed slots, one ability per kind

use super::{ItemError, UnequippableReason};
use serde::{Deserialize, Serialize};

/// The fixed roster of equippable ability kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    DoubleJump,
    Dash,
    WallGrab,
    ChargedShot,
    ShieldBreaker,
}

/// An equippable ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub name: String,
}

impl Ability {
    pub fn new(kind: AbilityKind, name: impl Into<String>) -> Self {
        Ability {
            kind,
            name: name.into(),
        }
    }
}

/// A character's equipped abilities: limited slots, no duplicate kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityLoadout {
    max_slots: usize,
    abilities: Vec<Ability>,
}

impl AbilityLoadout {
    pub fn new(max_slots: usize) -> Self {
        AbilityLoadout {
            max_slots,
            abilities: Vec::new(),
        }
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn has(&self, kind: AbilityKind) -> bool {
        self.abilities.iter().any(|a| a.kind == kind)
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots.saturating_sub(self.abilities.len())
    }

    /// Equip an ability. Fails with the matching
    /// [`ItemError::UnequippableAbility`] reason when the slots are full or
    /// an ability of the same kind is already equipped.
    pub fn equip(&mut self, ability: Ability) -> Result<(), ItemError> {
        if self.has(ability.kind) {
            return Err(ItemError::UnequippableAbility(
                UnequippableReason::DuplicateType,
            ));
        }
        if self.abilities.len() >= self.max_slots {
            return Err(ItemError::UnequippableAbility(
                UnequippableReason::NumberExceeded,
            ));
        }
        self.abilities.push(ability);
        Ok(())
    }

    /// Remove the ability of `kind`, returning it if it was equipped.
    pub fn unequip(&mut self, kind: AbilityKind) -> Option<Ability> {
        let index = self.abilities.iter().position(|a| a.kind == kind)?;
        Some(self.abilities.remove(index))
    }
}
