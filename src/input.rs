//! Input sampling
//!
//! Turns raw key/button/drag state into a [`TickInput`]. On-screen buttons
//! press the same logical keys as the keyboard, so the sim never knows which
//! device was used.

use std::collections::BTreeSet;

use crate::sim::TickInput;

/// Keys the game listens to (named after DOM `KeyboardEvent.code`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    KeyA,
    KeyD,
    Space,
}

impl Key {
    /// Map a DOM key code; unknown codes are ignored
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyA" => Some(Key::KeyA),
            "KeyD" => Some(Key::KeyD),
            "Space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Fire,
}

impl TouchButton {
    fn key(self) -> Key {
        match self {
            TouchButton::Left => Key::ArrowLeft,
            TouchButton::Right => Key::ArrowRight,
            TouchButton::Fire => Key::Space,
        }
    }
}

/// Held-key state plus an optional drag point
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held: BTreeSet<Key>,
    drag_x: Option<f32>,
    idle_mode: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Route a DOM key event by code; returns false for keys we ignore
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        if pressed {
            self.key_down(key);
        } else {
            self.key_up(key);
        }
        true
    }

    pub fn button_press(&mut self, button: TouchButton) {
        self.key_down(button.key());
    }

    /// Also used for pointer-up-outside
    pub fn button_release(&mut self, button: TouchButton) {
        self.key_up(button.key());
    }

    /// Drag gesture at game-space x
    pub fn drag_to(&mut self, x: f32) {
        self.drag_x = Some(x);
    }

    pub fn drag_end(&mut self) {
        self.drag_x = None;
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
    }

    /// Release everything (focus lost, round reset)
    pub fn clear(&mut self) {
        self.held.clear();
        self.drag_x = None;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Current control vector
    pub fn sample(&self) -> TickInput {
        TickInput {
            left: self.is_held(Key::ArrowLeft) || self.is_held(Key::KeyA),
            right: self.is_held(Key::ArrowRight) || self.is_held(Key::KeyD),
            fire: self.is_held(Key::Space),
            target_x: self.drag_x,
            idle_mode: self.idle_mode,
        }
    }
}
