//! Leaderboard
//!
//! In-memory top 5, sorted by score descending. A qualifying score first goes
//! in as a pending entry; the host collects a name and submits it.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_ENTRIES;
use crate::error::LeaderboardError;

/// Longest name kept
pub const MAX_NAME_LEN: usize = 12;

/// Name used when the player submits a blank one
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// `None` while waiting for the player to type a name
    pub name: Option<String>,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn is_pending(&self) -> bool {
        self.name.is_none()
    }

    /// Name for display
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("...")
    }
}

/// Top scores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    /// Named entry pushed off the bottom by the pending one; restored if the
    /// pending entry never gets a name
    #[serde(default)]
    evicted: Option<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            evicted: None,
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Entries that already have a name, including one held back by a
    /// pending entry (always the lowest)
    fn named(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| !e.is_pending())
            .chain(self.evicted.iter())
    }

    /// Check if a score would make the board (ignoring any pending entry)
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.named().count() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        // Must beat the lowest named entry
        self.named().last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.named().position(|e| score > e.score);
        Some(rank.unwrap_or(self.named().count()) + 1)
    }

    /// Insert a score awaiting a name
    ///
    /// Replaces any earlier pending entry. Returns the rank (1-indexed) or
    /// None if it didn't qualify.
    pub fn insert_pending(&mut self, score: u32) -> Option<usize> {
        self.discard_pending();
        let rank = self.potential_rank(score)?;

        // Find insertion point (sorted descending, ties keep older first)
        let pos = rank - 1;
        self.entries.insert(pos, LeaderboardEntry { name: None, score });
        if self.entries.len() > MAX_LEADERBOARD_ENTRIES {
            self.evicted = self.entries.pop();
        }

        Some(rank)
    }

    pub fn pending(&self) -> Option<(usize, &LeaderboardEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.is_pending())
            .map(|(i, e)| (i + 1, e))
    }

    /// Name the pending entry; returns its rank
    pub fn submit_name(&mut self, name: &str) -> Result<usize, LeaderboardError> {
        let (idx, entry) = self
            .entries
            .iter_mut()
            .enumerate()
            .find(|(_, e)| e.is_pending())
            .ok_or(LeaderboardError::NoPendingEntry)?;

        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            trimmed.chars().take(MAX_NAME_LEN).collect()
        };
        log::info!("Leaderboard #{}: {} ({})", idx + 1, name, entry.score);
        entry.name = Some(name);
        self.evicted = None;
        Ok(idx + 1)
    }

    /// Drop the pending entry (player skipped name entry)
    ///
    /// Any named entry it pushed off the board comes back.
    pub fn discard_pending(&mut self) {
        self.entries.retain(|e| !e.is_pending());
        if let Some(entry) = self.evicted.take() {
            self.entries.push(entry);
        }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.named().next().map(|e| e.score)
    }
}
