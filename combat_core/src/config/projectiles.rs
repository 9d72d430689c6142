//! Projectile configuration loading

use super::ConfigError;
use crate::projectile::{ProjectileRegistry, ProjectileSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for projectile configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilesConfig {
    #[serde(rename = "projectile_types")]
    pub projectile_types: Vec<ProjectileSpec>,
}

fn into_registry(config: ProjectilesConfig) -> Result<ProjectileRegistry, ConfigError> {
    let mut registry = ProjectileRegistry::new();
    for spec in config.projectile_types {
        if spec.power < 0 {
            return Err(ConfigError::Validation(format!(
                "projectile '{}': power must not be negative",
                spec.id
            )));
        }
        if spec.lifetime <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "projectile '{}': lifetime must be positive",
                spec.id
            )));
        }
        registry.register(spec);
    }
    Ok(registry)
}

/// Load projectile templates from a TOML file
pub fn load_projectile_configs(path: &Path) -> Result<ProjectileRegistry, ConfigError> {
    into_registry(super::load_toml(path)?)
}

/// Load projectile templates from a TOML string
pub fn parse_projectile_configs(content: &str) -> Result<ProjectileRegistry, ConfigError> {
    into_registry(super::parse_toml(content)?)
}
