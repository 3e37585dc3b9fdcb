//! Error types
//!
//! Round outcomes (won/lost) are game states, not errors. These cover the
//! things that can actually go wrong around the simulation: bad config,
//! missing textures, and leaderboard misuse.

use std::fmt;

/// Invalid game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(String),
    EmptyTargetWord,
    /// Target word contains a non-letter
    InvalidLetter(char),
    /// Named field is zero, negative, non-finite, or too small
    OutOfRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
            Self::EmptyTargetWord => write!(f, "target word must not be empty"),
            Self::InvalidLetter(c) => write!(f, "target word contains non-letter {c:?}"),
            Self::OutOfRange(field) => write!(f, "config field `{field}` is out of range"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A texture failed to load; the game can't start without it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub asset: String,
    pub reason: String,
}

impl LoadError {
    /// Message shown on the loading screen
    pub fn user_message(&self) -> String {
        format!("Loading failed: could not load {}. Please refresh to try again.", self.asset)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load texture `{}`: {}", self.asset, self.reason)
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardError {
    /// A name was submitted but no score is waiting for one
    NoPendingEntry,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPendingEntry => write!(f, "no leaderboard entry is awaiting a name"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Anything that stops the app from booting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Config(ConfigError),
    Load(LoadError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Load(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Load(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}
