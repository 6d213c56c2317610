//! Fruit Dodge - a falling-fruit arcade game
//!
//! Core modules:
//! - `sim`: Pure simulation (falling fruit, collisions, survival score, difficulty)
//! - `platform`: Cooperative timers and held-input controls
//! - `game`: Single owner of the session, serializes ticks, spawns and input
//! - `highscores`: Bounded best-scores table
//! - `persistence`: Injectable storage for the best-scores table
//! - `renderer`: Terminal renderer

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{DifficultyPreset, Settings};

/// Game configuration constants
///
/// Positions live in a 0-100 field on both axes.
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const TICK_MS: u64 = 50;
    /// Held-button repeat period in milliseconds
    pub const REPEAT_MS: u64 = 50;
    /// Maximum simulation ticks per advance, to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Distance a fruit falls per tick
    pub const FALL_SPEED: f32 = 1.0;
    /// Fruit at or past this row have left the field
    pub const FIELD_BOTTOM: f32 = 100.0;
    /// Fruit must be strictly below this row to hit the player
    pub const PLAYER_Y_THRESHOLD: f32 = 85.0;
    /// Maximum horizontal distance (exclusive) that counts as a hit
    pub const COLLISION_THRESHOLD: f32 = 8.0;

    /// Player bounds and movement
    pub const PLAYER_MIN_X: f32 = 0.0;
    pub const PLAYER_MAX_X: f32 = 95.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_STEP: f32 = 5.0;

    /// Fruit spawn x is drawn from [0, SPAWN_X_MAX)
    pub const SPAWN_X_MAX: f32 = 95.0;
    /// Spawn interval multiplier applied per escalation
    pub const SPAWN_SHRINK: f64 = 0.9;
    /// Score step at which difficulty escalates
    pub const ESCALATION_STEP: u64 = 10;

    /// Best-scores table size
    pub const MAX_HIGH_SCORES: usize = 3;
    /// Maximum characters kept from a player name
    pub const MAX_NAME_LEN: usize = 20;
}
