//! Hold the Line - a letter-collecting arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, timers, collisions, round state)
//! - `input`: Keyboard/touch/drag sampling into a per-tick control vector
//! - `scene`: Draw commands for an external renderer
//! - `audio`: Sound cues and the loaded sound bank
//! - `assets`: Preload gate for textures and sounds
//! - `leaderboard`: Top-5 in-memory scoreboard
//! - `config`: Tunable game configuration
//! - `app`: Host-facing driver tying it all together

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod leaderboard;
pub mod scene;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use config::GameConfig;
pub use error::{AppError, ConfigError, LeaderboardError, LoadError};
pub use leaderboard::Leaderboard;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; per-tick speeds assume 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (game-space pixels)
    pub const PLAY_WIDTH: f32 = 1000.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Word whose distinct letters win the round
    pub const TARGET_WORD: &str = "SOLDIER";

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Distance from the bottom edge to the player's center
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;
    /// Player center can't get closer than this to either side
    pub const PLAYER_MARGIN: f32 = 20.0;
    /// Minimum time between shots
    pub const FIRE_COOLDOWN_MS: f64 = 300.0;

    /// Per-tick vertical speeds (pixels)
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const COLLECTIBLE_SPEED: f32 = 2.0;

    /// Bounding boxes (width, height)
    pub const PROJECTILE_SIZE: (f32, f32) = (6.0, 20.0);
    pub const ENEMY_BULLET_SIZE: (f32, f32) = (6.0, 20.0);
    pub const COLLECTIBLE_SIZE: (f32, f32) = (24.0, 32.0);
    /// Enemy body radius is 22, glow ring 28
    pub const ENEMY_RADIUS: f32 = 22.0;
    pub const ENEMY_GLOW_RADIUS: f32 = 28.0;

    /// Spawn placement
    pub const ENEMY_SPAWN_Y: f32 = 50.0;
    pub const ENEMY_SPAWN_MARGIN: f32 = 25.0;
    pub const COLLECTIBLE_SPAWN_Y: f32 = -20.0;
    pub const COLLECTIBLE_SPAWN_MARGIN: f32 = 20.0;
    /// Projectile appears this far above the player center
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 30.0;
    /// Enemy bullet appears this far below the enemy center
    pub const ENEMY_BULLET_SPAWN_OFFSET: f32 = 20.0;

    /// Timer periods
    pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 4000.0;
    pub const COLLECTIBLE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const ENEMY_FIRE_INTERVAL_MS: f64 = 1500.0;

    /// Round time budget and the warning window before it runs out
    pub const TIME_BUDGET_SECS: u32 = 60;
    pub const COUNTDOWN_SECS: u32 = 10;

    /// Leaderboard size
    pub const MAX_LEADERBOARD_ENTRIES: usize = 5;
}
