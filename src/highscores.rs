//! High score leaderboard
//!
//! Top 5 single-player wins, persisted under a fixed storage slot as a JSON
//! array of `{ "score": n, "date": "..." }` records.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence;
use crate::platform::Storage;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's final score
    pub score: u32,
    /// Locale-formatted date of the win
    pub date: String,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage slot
    pub const STORAGE_KEY: &'static str = "pongHighScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score, keeping the list sorted and trimmed.
    ///
    /// Equal scores keep their existing order, so a new entry goes after
    /// older entries with the same score. Returns the rank achieved
    /// (1-indexed), or None if it fell off the end.
    pub fn add_score(&mut self, score: u32, date: impl Into<String>) -> Option<usize> {
        let entry = HighScoreEntry {
            score,
            date: date.into(),
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Lines for the high score screen
    pub fn display_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No scores yet!".to_string()];
        }
        self.entries
            .iter()
            .map(|e| format!("Score: {} - Date: {}", e.score, e.date))
            .collect()
    }

    /// Load high scores; an unreadable slot is an empty list
    pub fn load(storage: &dyn Storage) -> Self {
        let mut scores: Self = persistence::load(storage, Self::STORAGE_KEY);
        // Hand-edited or older data may be unsorted or too long
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("{} high scores on record", scores.entries.len());
        scores
    }

    /// Save high scores; failures are logged and otherwise ignored
    pub fn save(&self, storage: &mut dyn Storage) {
        persistence::save_or_warn(storage, Self::STORAGE_KEY, self);
    }
}

/// Today's date as the player's locale writes it
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    js_sys::Date::new_0()
        .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

/// Today's date as the player's locale writes it
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    chrono::Local::now().format("%-m/%-d/%Y").to_string()
}
