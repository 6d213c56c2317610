//! Cooperative periodic timers
//!
//! The scheduler never runs callbacks itself. The owner asks for due firings
//! one at a time and handles each before asking again, so a timer cancelled
//! by a handler can never fire afterwards.

use std::time::Duration;

use crate::sim::Direction;

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fixed-rate simulation tick
    SimTick,
    /// Fruit spawn, period follows the session's spawn interval
    Spawn,
    /// Held-button repeat for one direction
    Repeat(Direction),
}

/// Handle to an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    period: Duration,
    due: Duration,
}

/// Periodic timers on a caller-driven clock
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the most recent `pop_due`/`set_now`
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Arm a periodic timer; first firing is one period from now
    pub fn arm(&mut self, kind: TimerKind, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(Duration::from_millis(1));
        self.timers.push(Timer {
            id,
            kind,
            period,
            due: self.now + period,
        });
        log::trace!("Armed {:?} every {:?}", kind, period);
        id
    }

    /// Disarm a timer. Returns false if it was not armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Change a timer's period and restart its phase from now
    pub fn rearm(&mut self, id: TimerId, period: Duration) -> bool {
        let now = self.now;
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.period = period.max(Duration::from_millis(1));
                timer.due = now + timer.period;
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of armed timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest deadline among armed timers
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Drop every firing due at or before `now`: overdue timers next fire
    /// one period after `now`. Returns how many timers were pushed back.
    pub fn skip_to(&mut self, now: Duration) -> usize {
        self.set_now(now);
        let now = self.now;
        let mut skipped = 0;
        for timer in self.timers.iter_mut().filter(|t| t.due <= now) {
            timer.due = now + timer.period;
            skipped += 1;
        }
        skipped
    }

    /// Deliver the earliest firing due at or before `now`.
    ///
    /// Ties go to the timer armed first. The clock is set to the firing's
    /// deadline so timers armed by its handler are phased from that instant.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, TimerKind)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.due <= now)
            .min_by_key(|t| (t.due, t.id.0))?;
        let fired = (timer.id, timer.kind);
        self.now = self.now.max(timer.due);
        timer.due += timer.period;
        Some(fired)
    }
}
