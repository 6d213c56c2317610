//! Input events and press-and-hold controls
//!
//! Each direction is a two-state machine, `Idle` or `Repeating(timer)`.
//! Only press and release events move between the states, which keeps at
//! most one repeat timer per direction and always disarms it on release.

use std::time::Duration;

use super::timer::{Scheduler, TimerId, TimerKind};
use crate::sim::Direction;

/// Everything the input source can ask of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Discrete key press: one step
    Move(Direction),
    /// Hold control pressed
    HoldStart(Direction),
    /// Hold control released
    HoldEnd(Direction),
    /// Pointer left the controls or the window lost focus
    Abandon,
    /// Start a new session after game over
    Restart,
    Quit,
}

/// State of one hold control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    #[default]
    Idle,
    Repeating(TimerId),
}

/// Hold state for both directions
#[derive(Debug)]
pub struct HoldControls {
    left: HoldState,
    right: HoldState,
    repeat: Duration,
}

impl HoldControls {
    pub fn new(repeat: Duration) -> Self {
        Self {
            left: HoldState::Idle,
            right: HoldState::Idle,
            repeat,
        }
    }

    pub fn state(&self, direction: Direction) -> HoldState {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut HoldState {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Begin holding `direction`.
    ///
    /// Returns true when a new hold started. A press while already repeating
    /// is ignored so a second timer is never armed.
    pub fn press(&mut self, direction: Direction, scheduler: &mut Scheduler) -> bool {
        let repeat = self.repeat;
        let slot = self.slot_mut(direction);
        match *slot {
            HoldState::Repeating(_) => false,
            HoldState::Idle => {
                let id = scheduler.arm(TimerKind::Repeat(direction), repeat);
                *slot = HoldState::Repeating(id);
                true
            }
        }
    }

    /// Stop holding `direction`, disarming its timer. Returns true if it was held.
    pub fn release(&mut self, direction: Direction, scheduler: &mut Scheduler) -> bool {
        let slot = self.slot_mut(direction);
        match std::mem::take(slot) {
            HoldState::Repeating(id) => {
                scheduler.cancel(id);
                true
            }
            HoldState::Idle => false,
        }
    }

    /// Release every held direction
    pub fn release_all(&mut self, scheduler: &mut Scheduler) {
        self.release(Direction::Left, scheduler);
        self.release(Direction::Right, scheduler);
    }

    /// True if `id` is the live repeat timer for `direction`
    pub fn owns(&self, direction: Direction, id: TimerId) -> bool {
        self.state(direction) == HoldState::Repeating(id)
    }
}

impl Default for HoldControls {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::consts::REPEAT_MS))
    }
}
