//! Platform plumbing shared by every front end
//!
//! - Timers (simulation tick, spawn, held-button repeat)
//! - Input event vocabulary and hold controls

pub mod input;
pub mod timer;

pub use input::{HoldControls, HoldState, InputEvent};
pub use timer::{Scheduler, TimerId, TimerKind};
