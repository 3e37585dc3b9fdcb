//! Sound cues
//!
//! The simulation never plays audio itself. Its [`GameEvent`]s map to named
//! cues, and the [`SoundBank`] forwards a cue to the host's [`AudioSink`]
//! only if that sound actually loaded.

use std::collections::BTreeSet;

use crate::sim::{GameEvent, LossCause};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoundCue {
    /// Player shot
    Fire,
    /// Enemy destroyed
    Explosion,
    /// New letter collected
    Pickup,
    /// Player hit by an enemy bullet
    Death,
    /// Last seconds on the clock
    Countdown,
    /// Round won
    Win,
    /// Round lost
    Lose,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Fire,
        SoundCue::Explosion,
        SoundCue::Pickup,
        SoundCue::Death,
        SoundCue::Countdown,
        SoundCue::Win,
        SoundCue::Lose,
    ];

    /// Asset name the host registers the sound under
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Fire => "fire",
            SoundCue::Explosion => "explosion",
            SoundCue::Pickup => "pickup",
            SoundCue::Death => "death",
            SoundCue::Countdown => "countdown",
            SoundCue::Win => "win",
            SoundCue::Lose => "lose",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cue| cue.name() == name)
    }

    /// Cues an event should trigger, in play order
    pub fn for_event(event: &GameEvent) -> &'static [SoundCue] {
        match event {
            GameEvent::ProjectileFired => &[SoundCue::Fire],
            GameEvent::EnemyDestroyed(_) => &[SoundCue::Explosion],
            GameEvent::LetterCollected { new: true, .. } => &[SoundCue::Pickup],
            GameEvent::Countdown { .. } => &[SoundCue::Countdown],
            GameEvent::RoundWon { .. } => &[SoundCue::Win],
            GameEvent::RoundLost {
                cause: LossCause::Shot,
                ..
            } => &[SoundCue::Death, SoundCue::Lose],
            GameEvent::RoundLost { .. } => &[SoundCue::Lose],
            GameEvent::RoundStarted
            | GameEvent::EnemyFired(_)
            | GameEvent::LetterCollected { new: false, .. } => &[],
        }
    }
}

/// Host audio player (fire-and-forget)
pub trait AudioSink {
    fn play(&mut self, name: &str, volume: f32);
}

/// Sink that drops everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _name: &str, _volume: f32) {}
}

/// Sounds that loaded, plus volume settings
#[derive(Debug, Clone)]
pub struct SoundBank {
    loaded: BTreeSet<SoundCue>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundBank {
    /// Empty bank: every cue is silently skipped
    pub fn new() -> Self {
        Self {
            loaded: BTreeSet::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Bank with every cue available
    pub fn with_all() -> Self {
        let mut bank = Self::new();
        bank.loaded.extend(SoundCue::ALL);
        bank
    }

    pub fn mark_loaded(&mut self, cue: SoundCue) {
        self.loaded.insert(cue);
    }

    pub fn is_loaded(&self, cue: SoundCue) -> bool {
        self.loaded.contains(&cue)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue; missing sounds and zero volume are skipped
    ///
    /// Returns whether the sink was called.
    pub fn play(&self, sink: &mut dyn AudioSink, cue: SoundCue) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 || !self.is_loaded(cue) {
            return false;
        }
        sink.play(cue.name(), vol);
        true
    }

    /// Play every cue an event maps to
    pub fn play_event(&self, sink: &mut dyn AudioSink, event: &GameEvent) {
        for &cue in SoundCue::for_event(event) {
            self.play(sink, cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityId;

    #[derive(Default)]
    struct Recorder(Vec<(String, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, name: &str, volume: f32) {
            self.0.push((name.to_string(), volume));
        }
    }

    #[test]
    fn test_names_round_trip() {
        for cue in SoundCue::ALL {
            assert_eq!(SoundCue::from_name(cue.name()), Some(cue));
        }
        assert_eq!(SoundCue::from_name("music"), None);
    }

    #[test]
    fn test_missing_sound_is_skipped() {
        let mut bank = SoundBank::new();
        bank.mark_loaded(SoundCue::Fire);
        let mut sink = Recorder::default();

        assert!(bank.play(&mut sink, SoundCue::Fire));
        assert!(!bank.play(&mut sink, SoundCue::Explosion));
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].0, "fire");
    }

    #[test]
    fn test_mute_and_volume() {
        let mut bank = SoundBank::with_all();
        bank.set_master_volume(0.5);
        bank.set_sfx_volume(2.0);
        let mut sink = Recorder::default();
        bank.play(&mut sink, SoundCue::Win);
        assert_eq!(sink.0[0].1, 0.5);

        bank.set_muted(true);
        assert!(!bank.play(&mut sink, SoundCue::Win));
    }

    #[test]
    fn test_event_cues() {
        let bank = SoundBank::with_all();
        let mut sink = Recorder::default();
        bank.play_event(
            &mut sink,
            &GameEvent::RoundLost {
                elapsed_secs: 3,
                cause: LossCause::Shot,
            },
        );
        bank.play_event(&mut sink, &GameEvent::LetterCollected { letter: 'S', new: false });
        bank.play_event(&mut sink, &GameEvent::EnemyDestroyed(EntityId(4)));
        let names: Vec<&str> = sink.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["death", "lose", "explosion"]);
    }
}
