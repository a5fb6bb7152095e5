//! Tunable simulation constants
//!
//! Loaded from the `settings` section of a RON game config. Every field has a
//! default, so a config only needs to name what it changes.

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Gravity and integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Velocity added per nominal 60 Hz frame while airborne (units/sec)
    pub gravity: i32,
    /// Duration of one physics sub-step in seconds
    pub fixed_step: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 60,
            fixed_step: 1.0 / 60.0,
        }
    }
}

/// Player movement speeds (units/sec, negative is up or left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub walk_speed: i32,
    pub jump_velocity: i32,
    pub climb_up_velocity: i32,
    pub climb_down_velocity: i32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            walk_speed: 180,
            jump_velocity: -750,
            climb_up_velocity: -120,
            climb_down_velocity: 180,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolSettings {
    /// Enemy walking speed (units/sec)
    pub walk_speed: i32,
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self { walk_speed: 90 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    pub max_health: i32,
    pub spike_damage: i32,
    pub enemy_damage: i32,
    pub coin_heal: i32,
    /// Ticks of invulnerability after taking damage
    pub invincible_frames: u8,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            max_health: 100,
            spike_damage: 20,
            enemy_damage: 10,
            coin_heal: 10,
            invincible_frames: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    /// Vertical velocity given to the player after stomping an enemy
    pub stomp_bounce_velocity: i32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            stomp_bounce_velocity: -400,
        }
    }
}

/// All simulation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub physics: PhysicsSettings,
    pub control: ControlSettings,
    pub patrol: PatrolSettings,
    pub health: HealthSettings,
    pub combat: CombatSettings,
}

impl GameSettings {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.physics.fixed_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                name: "physics.fixed_step",
                reason: format!("must be a positive number of seconds, got {step}"),
            });
        }
        if self.health.max_health <= 0 {
            return Err(ConfigError::InvalidSetting {
                name: "health.max_health",
                reason: format!("must be positive, got {}", self.health.max_health),
            });
        }
        Ok(())
    }
}
