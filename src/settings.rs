//! Game settings and preferences
//!
//! Read from a JSON file next to the game. Missing fields take their
//! defaults; a missing or unreadable file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{REPEAT_MS, TICK_MS};
use crate::sim::SessionConfig;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "FRUIT_DODGE_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "fruit_dodge_settings.json";

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    /// Slow start, spawn interval never below 500ms
    #[default]
    Classic,
    /// Fast start, spawn interval may drop to 100ms
    Arcade,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Classic => "Classic",
            DifficultyPreset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "normal" => Some(DifficultyPreset::Classic),
            "arcade" | "hard" => Some(DifficultyPreset::Arcade),
            _ => None,
        }
    }

    /// Spawn interval at the start of a session
    pub fn initial_spawn_interval_ms(&self) -> f64 {
        match self {
            DifficultyPreset::Classic => 2000.0,
            DifficultyPreset::Arcade => 1000.0,
        }
    }

    /// Lowest spawn interval escalation can reach
    pub fn spawn_interval_floor_ms(&self) -> f64 {
        match self {
            DifficultyPreset::Classic => 500.0,
            DifficultyPreset::Arcade => 100.0,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            initial_spawn_interval_ms: self.initial_spawn_interval_ms(),
            spawn_interval_floor_ms: self.spawn_interval_floor_ms(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyPreset,

    // === Timing ===
    /// Simulation tick period (ms)
    pub tick_ms: u64,
    /// Held-button repeat period (ms)
    pub repeat_ms: u64,

    // === Scores ===
    /// Name recorded with qualifying scores
    pub player_name: String,
    /// Where the best-scores table is kept (None = memory only)
    pub high_scores_path: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs (None = time based)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Classic,
            tick_ms: TICK_MS,
            repeat_ms: REPEAT_MS,
            player_name: crate::highscores::DEFAULT_NAME.to_string(),
            high_scores_path: Some(PathBuf::from("fruit_dodge_scores.json")),
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            ..Self::default()
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        self.difficulty.session_config()
    }

    /// Tick period, never zero
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Repeat period, never zero
    pub fn repeat_period(&self) -> Duration {
        Duration::from_millis(self.repeat_ms.max(1))
    }

    /// Settings file location: `$FRUIT_DODGE_SETTINGS` or the default file name
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from_path(&Self::default_path())
    }

    /// Apply command-line overrides. The only argument is a difficulty name;
    /// an unknown name is logged and ignored.
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(arg) = args.into_iter().next() {
            match DifficultyPreset::from_str(&arg) {
                Some(preset) => self.difficulty = preset,
                None => {
                    log::warn!("Unknown difficulty '{}', using {}", arg, self.difficulty.as_str())
                }
            }
        }
        self
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
