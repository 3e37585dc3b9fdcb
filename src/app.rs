//! Host-facing driver
//!
//! Owns the game state, leaderboard, and sound bank. The host calls
//! [`App::frame`] once per display frame with the real elapsed time; the app
//! runs as many fixed simulation steps as that covers.

use crate::assets::{AssetLoader, AssetManifest, preload};
use crate::audio::{AudioSink, SoundBank};
use crate::config::GameConfig;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{AppError, LeaderboardError};
use crate::leaderboard::Leaderboard;
use crate::scene::{DrawCommand, build_scene};
use crate::sim::{GameEvent, GameState, RoundPhase, TickInput, tick};

/// How the last round ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub phase: RoundPhase,
    pub elapsed_secs: u32,
    /// Only won rounds score
    pub score: Option<u32>,
    /// Leaderboard rank if the score made the board (awaiting a name)
    pub rank: Option<usize>,
}

pub struct App {
    pub state: GameState,
    pub leaderboard: Leaderboard,
    sounds: SoundBank,
    accumulator: f32,
    outcome: Option<RoundOutcome>,
}

impl App {
    /// Validate config and preload assets; the round waits for [`App::start`]
    pub fn boot(
        config: GameConfig,
        seed: u64,
        loader: &mut dyn AssetLoader,
        manifest: &AssetManifest,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let assets = preload(loader, manifest)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state: GameState::new(config, seed),
            leaderboard: Leaderboard::new(),
            sounds: assets.sounds,
            accumulator: 0.0,
            outcome: None,
        })
    }

    /// Start or restart a round ("play again")
    pub fn start(&mut self) {
        // An unnamed score from the last round is given up
        self.leaderboard.discard_pending();
        self.state.reset();
        self.accumulator = 0.0;
        self.outcome = None;
    }

    /// Run simulation ticks for `dt` seconds of real time
    ///
    /// Plays sound cues and settles the leaderboard when the round ends.
    /// Returns the events produced during this frame.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &TickInput,
        sink: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we couldn't simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let events = self.state.drain_events();
        for event in &events {
            self.sounds.play_event(sink, event);
            if matches!(event, GameEvent::RoundWon { .. } | GameEvent::RoundLost { .. }) {
                self.finish_round();
            }
        }
        events
    }

    fn finish_round(&mut self) {
        let score = self.state.score();
        let rank = score.and_then(|s| self.leaderboard.insert_pending(s));
        if let Some(rank) = rank {
            log::info!("Score {} made the leaderboard at #{}", score.unwrap_or(0), rank);
        }
        self.outcome = Some(RoundOutcome {
            phase: self.state.phase,
            elapsed_secs: self.state.elapsed_secs,
            score,
            rank,
        });
    }

    /// Name the pending leaderboard entry
    pub fn submit_name(&mut self, name: &str) -> Result<usize, LeaderboardError> {
        self.leaderboard.submit_name(name)
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn sounds_mut(&mut self) -> &mut SoundBank {
        &mut self.sounds
    }

    /// Draw commands for the current frame
    pub fn scene(&self) -> Vec<DrawCommand> {
        build_scene(&self.state)
    }
}
