//! Asset preloading
//!
//! Textures are required: one failing stops the game from starting. Sounds
//! are optional: a failed sound is logged and its cue becomes silent.

use serde::{Deserialize, Serialize};

use crate::audio::{SoundBank, SoundCue};
use crate::error::LoadError;

/// One asset to fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub path: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Everything to fetch before the first round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: Vec<AssetEntry>,
    pub sounds: Vec<AssetEntry>,
}

impl AssetManifest {
    /// The game's stock manifest: the player sprite plus one sound per cue
    pub fn standard() -> Self {
        Self {
            textures: vec![AssetEntry::new("player", "assets/player.png")],
            sounds: SoundCue::ALL
                .iter()
                .map(|cue| AssetEntry::new(cue.name(), format!("assets/sfx/{}.mp3", cue.name())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Host-side fetcher
///
/// Errors are plain strings: the core only reports them.
pub trait AssetLoader {
    fn load_texture(&mut self, entry: &AssetEntry) -> Result<(), String>;
    fn load_sound(&mut self, entry: &AssetEntry) -> Result<(), String>;
}

/// Loader that succeeds without fetching anything (headless runs)
#[derive(Debug, Default)]
pub struct NoopLoader;

impl AssetLoader for NoopLoader {
    fn load_texture(&mut self, _entry: &AssetEntry) -> Result<(), String> {
        Ok(())
    }

    fn load_sound(&mut self, _entry: &AssetEntry) -> Result<(), String> {
        Ok(())
    }
}

/// Result of a successful preload
#[derive(Debug, Clone)]
pub struct LoadedAssets {
    pub textures: Vec<String>,
    pub sounds: SoundBank,
    /// Sounds that failed and will be skipped
    pub missing_sounds: Vec<String>,
}

/// Fetch every asset in the manifest
pub fn preload(
    loader: &mut dyn AssetLoader,
    manifest: &AssetManifest,
) -> Result<LoadedAssets, LoadError> {
    let mut textures = Vec::with_capacity(manifest.textures.len());
    for entry in &manifest.textures {
        loader.load_texture(entry).map_err(|reason| {
            log::error!("Texture {} ({}) failed: {}", entry.name, entry.path, reason);
            LoadError {
                asset: entry.name.clone(),
                reason,
            }
        })?;
        textures.push(entry.name.clone());
    }

    let mut sounds = SoundBank::new();
    let mut missing_sounds = Vec::new();
    for entry in &manifest.sounds {
        match loader.load_sound(entry) {
            Ok(()) => match SoundCue::from_name(&entry.name) {
                Some(cue) => sounds.mark_loaded(cue),
                None => log::warn!("Sound {} doesn't match any cue, ignoring", entry.name),
            },
            Err(reason) => {
                log::warn!("Sound {} failed to load ({}), continuing without it", entry.name, reason);
                missing_sounds.push(entry.name.clone());
            }
        }
    }

    log::info!(
        "Preloaded {} textures, {} sounds ({} missing)",
        textures.len(),
        manifest.sounds.len() - missing_sounds.len(),
        missing_sounds.len()
    );

    Ok(LoadedAssets {
        textures,
        sounds,
        missing_sounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails any asset whose name is listed
    struct Flaky(Vec<&'static str>);

    impl AssetLoader for Flaky {
        fn load_texture(&mut self, entry: &AssetEntry) -> Result<(), String> {
            if self.0.iter().any(|name| *name == entry.name) {
                Err("404".to_string())
            } else {
                Ok(())
            }
        }

        fn load_sound(&mut self, entry: &AssetEntry) -> Result<(), String> {
            self.load_texture(entry)
        }
    }

    #[test]
    fn test_standard_manifest_covers_every_cue() {
        let manifest = AssetManifest::standard();
        assert_eq!(manifest.sounds.len(), SoundCue::ALL.len());
        assert_eq!(manifest.textures.len(), 1);
    }

    #[test]
    fn test_everything_loads() {
        let loaded = preload(&mut NoopLoader, &AssetManifest::standard()).unwrap();
        assert_eq!(loaded.textures, vec!["player".to_string()]);
        assert!(loaded.missing_sounds.is_empty());
        for cue in SoundCue::ALL {
            assert!(loaded.sounds.is_loaded(cue));
        }
    }

    #[test]
    fn test_texture_failure_is_fatal() {
        let err = preload(&mut Flaky(vec!["player"]), &AssetManifest::standard()).unwrap_err();
        assert_eq!(err.asset, "player");
        assert_eq!(err.reason, "404");
        assert!(err.user_message().starts_with("Loading failed"));
    }

    #[test]
    fn test_sound_failure_degrades() {
        let loaded = preload(&mut Flaky(vec!["explosion", "win"]), &AssetManifest::standard())
            .unwrap();
        assert_eq!(loaded.missing_sounds, vec!["explosion".to_string(), "win".to_string()]);
        assert!(!loaded.sounds.is_loaded(SoundCue::Explosion));
        assert!(!loaded.sounds.is_loaded(SoundCue::Win));
        assert!(loaded.sounds.is_loaded(SoundCue::Fire));
    }
}
