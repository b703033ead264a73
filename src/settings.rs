//! Game settings and preferences
//!
//! Persisted separately from the high scores.

use serde::{Deserialize, Serialize};

use crate::consts::MUSIC_VOLUME;
use crate::persistence;
use crate::platform::Storage;
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Menu and game music
    pub music_enabled: bool,
    /// Hit sound effects
    pub sfx_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Gameplay ===
    /// Last difficulty picked in the single-player menu
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            music_volume: MUSIC_VOLUME,
            sfx_volume: 1.0,
            difficulty: Difficulty::Medium,
        }
    }
}

impl Settings {
    /// Storage slot
    pub const STORAGE_KEY: &'static str = "pongSettings";

    /// Flip music on/off, returns the new value
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Flip sound effects on/off, returns the new value
    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx_enabled = !self.sfx_enabled;
        self.sfx_enabled
    }

    /// Label for the options screen button
    pub fn music_label(&self) -> String {
        format!("Music: {}", if self.music_enabled { "ON" } else { "OFF" })
    }

    /// Label for the options screen button
    pub fn sfx_label(&self) -> String {
        format!("SFX: {}", if self.sfx_enabled { "ON" } else { "OFF" })
    }

    /// Volumes pulled back into range (stored data may be hand-edited)
    fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings; an unreadable slot yields defaults
    pub fn load(storage: &dyn Storage) -> Self {
        persistence::load::<Self>(storage, Self::STORAGE_KEY).sanitized()
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, storage: &mut dyn Storage) {
        persistence::save_or_warn(storage, Self::STORAGE_KEY, self);
    }
}
