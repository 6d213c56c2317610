//! Game state and core simulation types
//!
//! Everything the renderer needs for one frame lives in [`GameSession`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fruit falling, score counting
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Horizontal direction, used both for move requests and for player facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Signed unit step along x
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Fruit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Banana,
    Orange,
    Pear,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Orange,
        FruitKind::Pear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Banana => "banana",
            FruitKind::Orange => "orange",
            FruitKind::Pear => "pear",
        }
    }

    /// Single-cell glyph for text rendering
    pub fn glyph(&self) -> char {
        match self {
            FruitKind::Apple => 'a',
            FruitKind::Banana => 'b',
            FruitKind::Orange => 'o',
            FruitKind::Pear => 'p',
        }
    }
}

/// A falling fruit. `x` is fixed at spawn, `y` only grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub kind: FruitKind,
    pub x: f32,
    pub y: f32,
}

impl FallingObject {
    pub fn new(kind: FruitKind, x: f32) -> Self {
        Self { kind, x, y: 0.0 }
    }

    /// True once the fruit has fallen out of the field
    pub fn is_out(&self) -> bool {
        self.y >= FIELD_BOTTOM
    }

    /// True when this fruit hits a player standing at `player_x`
    pub fn hits(&self, player_x: f32) -> bool {
        self.y > PLAYER_Y_THRESHOLD && (self.x - player_x).abs() < COLLISION_THRESHOLD
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge, always within [PLAYER_MIN_X, PLAYER_MAX_X]
    pub x: f32,
    /// Last requested direction
    pub facing: Direction,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            facing: Direction::Right,
        }
    }
}

/// Spawn timing for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub initial_spawn_interval_ms: f64,
    pub spawn_interval_floor_ms: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_spawn_interval_ms: 2000.0,
            spawn_interval_floor_ms: 500.0,
        }
    }
}

/// Things that happened during a tick or timer firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    FruitSpawned { kind: FruitKind, x: f32 },
    FruitsMissed { count: u64 },
    DifficultyIncreased { spawn_interval_ms: f64 },
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Falling fruit in spawn order
    pub objects: Vec<FallingObject>,
    pub player: Player,
    /// Survival score: one point per fruit that fell past the bottom
    pub score: u64,
    /// Current period of the spawn timer
    pub spawn_interval_ms: f64,
    pub phase: GamePhase,
    /// Simulation ticks elapsed
    pub ticks: u64,
    pub config: SessionConfig,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            objects: Vec::new(),
            player: Player::default(),
            score: 0,
            spawn_interval_ms: config.initial_spawn_interval_ms,
            phase: GamePhase::Playing,
            ticks: 0,
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
