//! Core types shared across the engine

use serde::{Deserialize, Serialize};

/// An additional effect a projectile or offensive consumable applies on
/// contact, after damage has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectApplication {
    /// Raise the target's blindness level
    Blindness { amount: f64 },
    /// Extend the target's corrosion window
    Corrosion { seconds: f64 },
}

impl EffectApplication {
    /// Display name of the effect kind
    pub fn name(&self) -> &'static str {
        match self {
            EffectApplication::Blindness { .. } => "Blindness",
            EffectApplication::Corrosion { .. } => "Corrosion",
        }
    }
}

/// What happened to a single effect application during impact resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOutcome {
    /// The effect reached the target's status state
    Applied,
    /// The status state refused it (e.g. blindness during its cooldown)
    Ignored,
    /// The target was immune for the duration of the impact
    BlockedByImmunity,
    /// The target has no status capability at all
    MissingCapability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_application_serialization() {
        let effect = EffectApplication::Corrosion { seconds: 3.0 };
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains("corrosion"));

        let back: EffectApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, effect);
    }

    #[test]
    fn test_effect_names() {
        assert_eq!(EffectApplication::Blindness { amount: 1.0 }.name(), "Blindness");
        assert_eq!(EffectApplication::Corrosion { seconds: 1.0 }.name(), "Corrosion");
    }
}
