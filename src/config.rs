//! External configuration for spawnable entities.
//!
//! Health wiring, drop tables, boss tuning, and shop stock are authored
//! outside the game as JSON, deserialized here, validated once, and handed
//! to the spawn functions as immutable values.

use serde::Deserialize;
use thiserror::Error;

use crate::components::{DropSpec, Stock};
use crate::constants::*;
use crate::feedback::{ParticleId, SfxId};

/// Configuration problems that reject a config outright. Degradable
/// problems (an unset trigger tag, a missing attack FX) are spawn-time
/// warnings instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max health for '{name}' must be positive, got {value}")]
    NonPositiveMaxHealth { name: String, value: i32 },
    #[error("chase speed for '{name}' must be positive, got {value}")]
    NonPositiveChaseSpeed { name: String, value: f32 },
    #[error("attack range for '{name}' must be positive, got {value}")]
    NonPositiveAttackRange { name: String, value: f32 },
    #[error("strike time {strike} for '{name}' must lie inside the attack duration {duration}")]
    StrikeOutsideSwing {
        name: String,
        strike: f32,
        duration: f32,
    },
    #[error("price for '{item}' must not be negative, got {price}")]
    NegativePrice { item: String, price: i32 },
    #[error("stock entry {index} in shop '{shop}' has an empty item name")]
    EmptyItemName { shop: String, index: usize },
}

/// Damage/health wiring for one damageable entity.
#[derive(Debug, Clone, Deserialize)]
pub struct LifeConfig {
    pub name: String,
    pub max_health: i32,
    /// Contact tag that damages this entity. Absent or empty degrades to
    /// scripted-damage-only (warned at spawn).
    #[serde(default)]
    pub trigger_tag: Option<String>,
    #[serde(default = "default_hurtbox_radius")]
    pub hurtbox_radius: f32,
    #[serde(default)]
    pub blood_splash: bool,
    #[serde(default)]
    pub hurt_sound: Option<SfxId>,
    #[serde(default)]
    pub death_sound: Option<SfxId>,
    #[serde(default)]
    pub hurt_particles: Vec<ParticleId>,
    #[serde(default)]
    pub death_particles: Option<ParticleId>,
    #[serde(default = "default_attack_fx")]
    pub attack_fx: bool,
    #[serde(default)]
    pub drops: Vec<DropSpec>,
}

fn default_hurtbox_radius() -> f32 {
    DEFAULT_HURTBOX_RADIUS
}

fn default_attack_fx() -> bool {
    true
}

impl LifeConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health <= 0 {
            return Err(ConfigError::NonPositiveMaxHealth {
                name: self.name.clone(),
                value: self.max_health,
            });
        }
        Ok(())
    }
}

/// Boss tuning on top of its life wiring.
#[derive(Debug, Clone, Deserialize)]
pub struct BossConfig {
    pub life: LifeConfig,
    pub chase_speed: f32,
    pub attack_range: f32,
    pub attack_damage: i32,
    pub attack_reach: f32,
    #[serde(default = "default_intro_duration")]
    pub intro_duration: f32,
    #[serde(default = "default_attack_duration")]
    pub attack_duration: f32,
    #[serde(default = "default_attack_strike_time")]
    pub attack_strike_time: f32,
}

fn default_intro_duration() -> f32 {
    DEFAULT_INTRO_DURATION
}

fn default_attack_duration() -> f32 {
    DEFAULT_ATTACK_DURATION
}

fn default_attack_strike_time() -> f32 {
    DEFAULT_ATTACK_STRIKE_TIME
}

impl BossConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.life.validate()?;
        if self.chase_speed <= 0.0 {
            return Err(ConfigError::NonPositiveChaseSpeed {
                name: self.life.name.clone(),
                value: self.chase_speed,
            });
        }
        if self.attack_range <= 0.0 {
            return Err(ConfigError::NonPositiveAttackRange {
                name: self.life.name.clone(),
                value: self.attack_range,
            });
        }
        if self.attack_strike_time < 0.0 || self.attack_strike_time > self.attack_duration {
            return Err(ConfigError::StrikeOutsideSwing {
                name: self.life.name.clone(),
                strike: self.attack_strike_time,
                duration: self.attack_duration,
            });
        }
        Ok(())
    }
}

/// A shop's name and shelf contents.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    pub name: String,
    pub stock: Vec<Stock>,
}

impl ShopConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.stock.iter().enumerate() {
            if entry.item.name.is_empty() {
                return Err(ConfigError::EmptyItemName {
                    shop: self.name.clone(),
                    index,
                });
            }
            if entry.price < 0 {
                return Err(ConfigError::NegativePrice {
                    item: entry.item.name.clone(),
                    price: entry.price,
                });
            }
        }
        Ok(())
    }
}
