//! Game configuration
//!
//! One immutable struct threaded into session construction instead of
//! ambient globals. Loadable from JSON; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::layouts::LAYOUT_COUNT;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,
    pub ticks_per_second: u32,

    // === Physics ===
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub item_terminal_velocity: f32,

    // === Player ===
    pub player_speed: f32,
    pub jump_power: f32,
    pub player_width: f32,
    pub small_height: f32,
    pub super_height: f32,
    pub player_spawn_x: f32,
    pub invincibility_ticks: u32,
    pub speed_boost_ticks: u32,
    pub speed_boost_multiplier: f32,
    pub max_fireballs: usize,
    pub shoot_cooldown_ticks: u32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    /// Stomp tolerance below enemy center (tunable, not derived)
    pub stomp_tolerance: f32,
    pub stomp_bounce: f32,

    // === Session ===
    pub max_lives: u32,
    pub max_level: u32,
    /// Level clock in seconds
    pub level_time: u32,
    pub combo_window_ticks: u32,
    pub combo_base_bonus: u64,

    // === Effects ===
    pub max_particles: usize,
    /// Seed for the particle RNG
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,

            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            item_terminal_velocity: ITEM_TERMINAL_VELOCITY,

            player_speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            player_width: PLAYER_WIDTH,
            small_height: SMALL_PLAYER_HEIGHT,
            super_height: SUPER_PLAYER_HEIGHT,
            player_spawn_x: PLAYER_SPAWN_X,
            invincibility_ticks: INVINCIBILITY_TICKS,
            speed_boost_ticks: SPEED_BOOST_TICKS,
            speed_boost_multiplier: SPEED_BOOST_MULTIPLIER,
            max_fireballs: MAX_FIREBALLS,
            shoot_cooldown_ticks: SHOOT_COOLDOWN_TICKS,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_speed: ENEMY_SPEED,
            stomp_tolerance: STOMP_TOLERANCE,
            stomp_bounce: STOMP_BOUNCE,

            max_lives: MAX_LIVES,
            max_level: MAX_LEVEL,
            level_time: LEVEL_TIME,
            combo_window_ticks: COMBO_WINDOW_TICKS,
            combo_base_bonus: COMBO_BASE_BONUS,

            max_particles: MAX_PARTICLES,
            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("item_terminal_velocity", self.item_terminal_velocity),
            ("player_width", self.player_width),
            ("small_height", self.small_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if !(self.ground_height >= 0.0 && self.ground_height < self.screen_height) {
            return Err(invalid(
                "ground_height",
                format!("must lie within the screen, got {}", self.ground_height),
            ));
        }
        if self.super_height < self.small_height {
            return Err(invalid(
                "super_height",
                format!("must be at least small_height ({})", self.small_height),
            ));
        }
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be non-zero".into()));
        }
        if self.max_lives == 0 {
            return Err(invalid("max_lives", "must be non-zero".into()));
        }
        if self.max_level == 0 || self.max_level > LAYOUT_COUNT {
            return Err(invalid(
                "max_level",
                format!("must be within 1..={LAYOUT_COUNT}, got {}", self.max_level),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    log::warn!("Rejected config: {field}: {reason}");
    ConfigError::Invalid { field, reason }
}
