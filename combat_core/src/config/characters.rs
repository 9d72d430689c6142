//! Character archetype configuration

use super::ConfigError;
use crate::status::StatusParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Standard value and bounds for one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub standard: i32,
    #[serde(default = "default_stat_min")]
    pub min: i32,
    #[serde(default = "default_stat_max")]
    pub max: i32,
}

fn default_stat_min() -> i32 {
    1
}

fn default_stat_max() -> i32 {
    999
}

/// One spawnable character archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    /// Unique identifier (e.g. "player", "acid_slug")
    pub id: String,
    /// Display name
    pub name: String,
    pub max_health: i32,
    #[serde(default)]
    pub invincible: bool,
    pub attack: StatRange,
    pub defence: StatRange,
    pub speed: StatRange,
    #[serde(default)]
    pub status: StatusParams,
}

/// Container for character archetype configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersConfig {
    #[serde(rename = "character_types")]
    pub character_types: Vec<CharacterConfig>,
}

fn validate(config: &CharacterConfig) -> Result<(), ConfigError> {
    if config.max_health <= 0 {
        return Err(ConfigError::Validation(format!(
            "character '{}': max_health must be positive",
            config.id
        )));
    }
    let blindness = &config.status.blindness;
    if !(0.0..=1.0).contains(&blindness.resistance) {
        return Err(ConfigError::Validation(format!(
            "character '{}': blindness resistance must be within [0, 1]",
            config.id
        )));
    }
    if blindness.max_level <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "character '{}': blindness max_level must be positive",
            config.id
        )));
    }
    if blindness.decrement_speed < 1.0 {
        return Err(ConfigError::Validation(format!(
            "character '{}': blindness decrement_speed must be at least 1",
            config.id
        )));
    }
    let corrosion = &config.status.corrosion;
    if corrosion.max_time <= 0.0 || corrosion.damage_interval <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "character '{}': corrosion max_time and damage_interval must be positive",
            config.id
        )));
    }
    Ok(())
}

fn into_map(config: CharactersConfig) -> Result<HashMap<String, CharacterConfig>, ConfigError> {
    let mut map = HashMap::new();
    for character in config.character_types {
        validate(&character)?;
        map.insert(character.id.clone(), character);
    }
    Ok(map)
}

/// Load character archetypes from a TOML file
pub fn load_character_configs(
    path: &Path,
) -> Result<HashMap<String, CharacterConfig>, ConfigError> {
    into_map(super::load_toml(path)?)
}

/// Load character archetypes from a TOML string
pub fn parse_character_configs(
    content: &str,
) -> Result<HashMap<String, CharacterConfig>, ConfigError> {
    into_map(super::parse_toml(content)?)
}
