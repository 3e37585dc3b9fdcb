//! Game configuration
//!
//! Defaults mirror [`crate::consts`]. A host may override any field from JSON;
//! missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable round parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play area width (game-space pixels)
    pub play_width: f32,
    /// Play area height (game-space pixels)
    pub play_height: f32,
    /// Word whose distinct letters must be collected
    pub target_word: String,

    // === Speeds (pixels per tick) ===
    pub player_speed: f32,
    pub projectile_speed: f32,
    pub enemy_bullet_speed: f32,
    pub collectible_speed: f32,

    // === Timers (milliseconds) ===
    pub fire_cooldown_ms: f64,
    pub enemy_spawn_interval_ms: f64,
    pub collectible_spawn_interval_ms: f64,
    pub enemy_fire_interval_ms: f64,

    // === Round clock ===
    /// Round is lost when elapsed seconds reach this (None = unlimited)
    pub time_budget_secs: Option<u32>,
    /// Countdown cue plays once per second inside this window
    pub countdown_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            target_word: TARGET_WORD.to_string(),

            player_speed: PLAYER_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            collectible_speed: COLLECTIBLE_SPEED,

            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            collectible_spawn_interval_ms: COLLECTIBLE_SPAWN_INTERVAL_MS,
            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,

            time_budget_secs: Some(TIME_BUDGET_SECS),
            countdown_secs: COUNTDOWN_SECS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for writing a starter config)
    pub fn to_json(&self) -> String {
        // A struct of plain numbers and strings always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject configs the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_word.is_empty() {
            return Err(ConfigError::EmptyTargetWord);
        }
        if let Some(c) = self.target_word.chars().find(|c| !c.is_alphabetic()) {
            return Err(ConfigError::InvalidLetter(c));
        }

        let min_width = 2.0 * PLAYER_MARGIN.max(ENEMY_SPAWN_MARGIN).max(COLLECTIBLE_SPAWN_MARGIN);
        let dims = [("play_width", self.play_width), ("play_height", self.play_height)];
        for (field, value) in dims {
            if !value.is_finite() || value <= min_width {
                return Err(ConfigError::OutOfRange(field));
            }
        }

        let speeds = [
            ("player_speed", self.player_speed),
            ("projectile_speed", self.projectile_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("collectible_speed", self.collectible_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange(field));
            }
        }

        let intervals = [
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("collectible_spawn_interval_ms", self.collectible_spawn_interval_ms),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
        ];
        for (field, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange(field));
            }
        }
        if !self.fire_cooldown_ms.is_finite() || self.fire_cooldown_ms < 0.0 {
            return Err(ConfigError::OutOfRange("fire_cooldown_ms"));
        }

        if self.time_budget_secs == Some(0) {
            return Err(ConfigError::OutOfRange("time_budget_secs"));
        }

        Ok(())
    }

    /// Upper-cased letters of the target word, in order, with duplicates
    pub fn word_letters(&self) -> Vec<char> {
        self.target_word
            .chars()
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Player center y (fixed)
    pub fn player_y(&self) -> f32 {
        self.play_height - PLAYER_BOTTOM_OFFSET
    }
}
