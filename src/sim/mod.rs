//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Randomness passed in by the caller
//! - No timers, rendering or platform dependencies

pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use player::move_player;
pub use spawn::spawn_fruit;
pub use state::{
    Direction, FallingObject, FruitKind, GameEvent, GamePhase, GameSession, Player, SessionConfig,
};
pub use tick::tick;
