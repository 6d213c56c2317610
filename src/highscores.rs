//! High score leaderboard
//!
//! Persisted through a [`ScoreStore`], tracks the top 3 survival scores.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HIGH_SCORES, MAX_NAME_LEN};
use crate::persistence::{PersistenceError, ScoreStore};

/// Name used when the player gives none
pub const DEFAULT_NAME: &str = "Player";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name, at most MAX_NAME_LEN characters
    pub name: String,
    /// Seconds survived
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: clean_name(name),
            score,
        }
    }
}

/// Trim and cap a player name
pub fn clean_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

/// High score leaderboard, highest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard.
    ///
    /// When full, the score must strictly beat the current last entry; a tie
    /// with it does not qualify.
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn record_attempt(&mut self, score: u64, name: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry::new(name, score);

        // Equal scores keep arrival order: insert after them
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse stored text. Anything that is not a JSON array yields an empty
    /// table; malformed entries inside the array are skipped.
    pub fn from_json(json: &str) -> Self {
        let values: Vec<serde_json::Value> = match serde_json::from_str(json) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {}", e);
                return Self::new();
            }
        };

        let mut entries: Vec<HighScoreEntry> = values
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<HighScoreEntry>(v) {
                Ok(entry) => Some(HighScoreEntry::new(&entry.name, entry.score)),
                Err(e) => {
                    log::warn!("Skipping bad high score entry: {}", e);
                    None
                }
            })
            .collect();

        // Stable: equal scores keep stored order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Load from a store, falling back to an empty table on any failure
    pub fn load_from<S: ScoreStore + ?Sized>(store: &S) -> Self {
        match store.load() {
            Ok(Some(json)) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Write to a store
    pub fn try_save_to<S: ScoreStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.save(&json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Write to a store, logging instead of failing
    pub fn save_to<S: ScoreStore + ?Sized>(&self, store: &mut S) {
        if let Err(e) = self.try_save_to(store) {
            log::warn!("Could not save high scores: {}", e);
        }
    }
}
