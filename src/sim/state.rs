//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]; there is no ambient
//! global state. Hosts drive it through `reset` and `tick` and read back
//! positions and [`GameEvent`]s.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entity::{EntityId, EntityStore};
use super::timers::{Scheduler, TimerKind};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for assets / first start
    NotStarted,
    /// Active gameplay
    Playing,
    /// Every letter collected
    Won,
    /// Hit by an enemy bullet or ran out of time
    Lost,
}

impl RoundPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Shot,
    OutOfTime,
}

/// Things that happened during a tick, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    ProjectileFired,
    EnemyFired(EntityId),
    EnemyDestroyed(EntityId),
    /// `new` is false when the letter was already collected
    LetterCollected { letter: char, new: bool },
    /// Seconds left on the clock, once per second near the end
    Countdown { remaining: u32 },
    RoundWon { elapsed_secs: u32 },
    RoundLost { elapsed_secs: u32, cause: LossCause },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Clock time of the last shot (None = never fired this round)
    pub last_fire_ms: Option<f64>,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.play_width / 2.0, config.player_y()),
            last_fire_ms: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Whether the fire cooldown has elapsed at `now_ms`
    pub fn can_fire(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_fire_ms
            .map(|last| now_ms - last >= cooldown_ms)
            .unwrap_or(true)
    }

    /// Move horizontally by `dx`, clamped to the play area
    pub fn shift(&mut self, dx: f32, play_width: f32) {
        // max/min rather than clamp: a too-narrow play area pins, not panics
        self.pos.x = (self.pos.x + dx)
            .min(play_width - PLAYER_MARGIN)
            .max(PLAYER_MARGIN);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: RoundPhase,
    /// Simulation clock (ms since the state was created)
    pub clock_ms: f64,
    /// Clock time of the last reset
    pub start_ms: f64,
    /// Whole seconds since the round started
    pub elapsed_secs: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub entities: EntityStore,
    pub timers: Scheduler,
    /// Letters picked up so far this round
    pub collected: BTreeSet<char>,
    /// Distinct letters of the target word
    required: BTreeSet<char>,
    /// Target word letters in order (with duplicates), for spawning and HUD
    word: Vec<char>,
    /// Last countdown second announced
    last_countdown: Option<u32>,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game waiting to start
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated config: {config:?}");
        let word = config.word_letters();
        let required = word.iter().copied().collect();
        let player = Player::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundPhase::NotStarted,
            clock_ms: 0.0,
            start_ms: 0.0,
            elapsed_secs: 0,
            time_ticks: 0,
            player,
            entities: EntityStore::new(),
            timers: Scheduler::new(),
            collected: BTreeSet::new(),
            required,
            word,
            last_countdown: None,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a round at the current clock time
    ///
    /// Clears entities, letters, and timers, recenters the player, and
    /// re-arms both spawners. Calling it twice in a row is the same as
    /// calling it once.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.timers.clear();
        self.collected.clear();
        self.events.clear();
        self.player = Player::new(&self.config);
        self.start_ms = self.clock_ms;
        self.elapsed_secs = 0;
        self.last_countdown = None;

        let now = self.clock_ms;
        self.timers
            .every(now, self.config.enemy_spawn_interval_ms, TimerKind::SpawnEnemy);
        self.timers.every(
            now,
            self.config.collectible_spawn_interval_ms,
            TimerKind::SpawnCollectible,
        );

        self.phase = RoundPhase::Playing;
        self.push_event(GameEvent::RoundStarted);
        log::info!("Round started (target word {:?})", self.config.target_word);
    }

    /// Target word letters in order
    pub fn word(&self) -> &[char] {
        &self.word
    }

    /// Distinct letters needed to win
    pub fn required_letters(&self) -> &BTreeSet<char> {
        &self.required
    }

    pub fn is_collected(&self, letter: char) -> bool {
        self.collected.contains(&letter)
    }

    /// Every distinct letter has been picked up
    pub fn has_all_letters(&self) -> bool {
        self.collected == self.required
    }

    /// Seconds left before the time budget runs out (None = unlimited)
    pub fn remaining_secs(&self) -> Option<u32> {
        self.config
            .time_budget_secs
            .map(|budget| budget.saturating_sub(self.elapsed_secs))
    }

    /// Score for a won round: seconds left under the time budget
    ///
    /// Higher is better. Rounds without a configured budget count against the
    /// default budget so scores stay comparable. Lost rounds don't score.
    pub fn score(&self) -> Option<u32> {
        if self.phase != RoundPhase::Won {
            return None;
        }
        let budget = self.config.time_budget_secs.unwrap_or(TIME_BUDGET_SECS);
        Some(budget.saturating_sub(self.elapsed_secs))
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at undrained events
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// End the round as won
    pub(crate) fn win(&mut self) {
        self.phase = RoundPhase::Won;
        self.timers.clear();
        self.push_event(GameEvent::RoundWon {
            elapsed_secs: self.elapsed_secs,
        });
        log::info!("Round won in {}s", self.elapsed_secs);
    }

    /// End the round as lost
    pub(crate) fn lose(&mut self, cause: LossCause) {
        self.phase = RoundPhase::Lost;
        self.timers.clear();
        self.push_event(GameEvent::RoundLost {
            elapsed_secs: self.elapsed_secs,
            cause,
        });
        log::info!("Round lost after {}s ({:?})", self.elapsed_secs, cause);
    }

    /// Announce the countdown second if it's new and inside the window
    pub(crate) fn update_countdown(&mut self) {
        let Some(remaining) = self.remaining_secs() else {
            return;
        };
        if remaining == 0 || remaining > self.config.countdown_secs {
            return;
        }
        if self.last_countdown != Some(remaining) {
            self.last_countdown = Some(remaining);
            self.push_event(GameEvent::Countdown { remaining });
        }
    }
}
