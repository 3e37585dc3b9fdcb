//! Browser bindings
//!
//! The page owns the canvas, audio, and asset fetching. It preloads assets
//! itself, reports which ones failed, then drives [`WebGame`] from
//! `requestAnimationFrame` and draws the returned scene.

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::assets::{AssetEntry, AssetLoader, AssetManifest};
use crate::audio::AudioSink;
use crate::config::GameConfig;
use crate::input::{InputSampler, TouchButton};

/// Loader answering from the page's own preload results
struct ReportedLoader {
    failed: Vec<String>,
}

impl ReportedLoader {
    fn check(&self, entry: &AssetEntry) -> Result<(), String> {
        if self.failed.iter().any(|name| *name == entry.name) {
            Err(format!("{} failed to load", entry.path))
        } else {
            Ok(())
        }
    }
}

impl AssetLoader for ReportedLoader {
    fn load_texture(&mut self, entry: &AssetEntry) -> Result<(), String> {
        self.check(entry)
    }

    fn load_sound(&mut self, entry: &AssetEntry) -> Result<(), String> {
        self.check(entry)
    }
}

/// Queues sound names for the page to play
#[derive(Default)]
struct QueuedSounds(Vec<String>);

impl AudioSink for QueuedSounds {
    fn play(&mut self, name: &str, _volume: f32) {
        self.0.push(name.to_string());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    app: App,
    input: InputSampler,
    sounds: QueuedSounds,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` may be empty for defaults; `failed_assets` lists asset
    /// names the page couldn't load
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, failed_assets: Vec<String>) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialized on a second WebGame; that's fine
        let _ = console_log::init_with_level(log::Level::Info);

        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let mut loader = ReportedLoader {
            failed: failed_assets,
        };
        let app = App::boot(config, seed, &mut loader, &AssetManifest::standard()).map_err(|e| {
            let message = match &e {
                crate::error::AppError::Load(load) => load.user_message(),
                other => other.to_string(),
            };
            JsValue::from_str(&message)
        })?;

        Ok(WebGame {
            app,
            input: InputSampler::new(),
            sounds: QueuedSounds::default(),
        })
    }

    /// Asset manifest the page should preload, as JSON
    pub fn manifest_json() -> String {
        serde_json::to_string(&AssetManifest::standard()).unwrap_or_default()
    }

    /// Start or restart a round
    pub fn start(&mut self) {
        self.input.clear();
        self.app.start();
    }

    /// Advance by `dt` seconds; returns this frame's events as JSON
    pub fn frame(&mut self, dt: f32) -> String {
        let input = self.input.sample();
        let events = self.app.frame(dt, &input, &mut self.sounds);
        serde_json::to_string(&events).unwrap_or_default()
    }

    /// Draw commands as JSON
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.app.scene()).unwrap_or_default()
    }

    /// Sound names queued since the last call
    pub fn take_sounds(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sounds.0)
    }

    /// `KeyboardEvent.code`; returns true if the game uses the key
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        self.input.key_event(code, pressed)
    }

    /// On-screen buttons: "left", "right", "fire"
    pub fn button(&mut self, name: &str, pressed: bool) {
        let button = match name {
            "left" => TouchButton::Left,
            "right" => TouchButton::Right,
            "fire" => TouchButton::Fire,
            _ => return,
        };
        if pressed {
            self.input.button_press(button);
        } else {
            self.input.button_release(button);
        }
    }

    pub fn drag_to(&mut self, x: f32) {
        self.input.drag_to(x);
    }

    pub fn drag_end(&mut self) {
        self.input.drag_end();
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.input.set_idle_mode(on);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.app.sounds_mut().set_muted(muted);
    }

    /// Name the pending leaderboard entry; returns its rank
    pub fn submit_name(&mut self, name: &str) -> Result<u32, JsValue> {
        self.app
            .submit_name(name)
            .map(|rank| rank as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn leaderboard_json(&self) -> String {
        serde_json::to_string(self.app.leaderboard.entries()).unwrap_or_default()
    }
}
