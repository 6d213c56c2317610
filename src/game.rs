//! Game loop ownership
//!
//! [`Game`] owns the session and every timer that touches it. The simulation
//! tick, the spawn timer and player input all run as short handlers on one
//! caller-driven loop, so no two of them ever interleave.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::platform::{HoldControls, InputEvent, Scheduler, TimerId, TimerKind};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, move_player, spawn_fruit, tick};

/// Convert a spawn interval to a timer period
fn spawn_period(interval_ms: f64) -> Duration {
    Duration::from_secs_f64(interval_ms.max(1.0) / 1000.0)
}

/// A running game: session, timers, hold controls and the best-scores table
pub struct Game<S: ScoreStore> {
    settings: Settings,
    session: GameSession,
    rng: Pcg32,
    scheduler: Scheduler,
    controls: HoldControls,
    high_scores: HighScores,
    store: S,
    sim_timer: Option<TimerId>,
    spawn_timer: Option<TimerId>,
    /// Final score of the current session already offered to the table
    score_submitted: bool,
}

impl<S: ScoreStore> Game<S> {
    /// Load the best-scores table and start the first session
    pub fn new(settings: Settings, store: S, seed: u64) -> Self {
        let high_scores = HighScores::load_from(&store);
        let mut game = Self {
            session: GameSession::new(settings.session_config()),
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            controls: HoldControls::new(settings.repeat_period()),
            high_scores,
            store,
            sim_timer: None,
            spawn_timer: None,
            score_submitted: false,
            settings,
        };
        game.start_timers();
        log::info!(
            "Game started ({} difficulty, seed {})",
            game.settings.difficulty.as_str(),
            seed
        );
        game
    }

    /// Current session, read-only (for rendering)
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controls(&self) -> &HoldControls {
        &self.controls
    }

    /// Next instant at which `advance` has work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Number of armed timers (tick, spawn and held-button repeats)
    pub fn armed_timers(&self) -> usize {
        self.scheduler.len()
    }

    fn start_timers(&mut self) {
        self.sim_timer = Some(
            self.scheduler
                .arm(TimerKind::SimTick, self.settings.tick_period()),
        );
        self.spawn_timer = Some(self.scheduler.arm(
            TimerKind::Spawn,
            spawn_period(self.session.spawn_interval_ms),
        ));
    }

    fn stop_timers(&mut self) {
        if let Some(id) = self.sim_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.spawn_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Run timer firings due up to `now`, one at a time, in deadline order.
    ///
    /// At most MAX_SUBSTEPS simulation ticks run per call; past that the
    /// remaining backlog is dropped so a stalled loop does not replay it.
    /// Returns what happened, in order, for sound/visual feedback.
    pub fn advance(&mut self, now: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut substeps = 0;

        while let Some((id, kind)) = self.scheduler.pop_due(now) {
            match kind {
                TimerKind::SimTick => {
                    let tick_events = tick(&mut self.session);
                    for event in &tick_events {
                        self.react(event);
                    }
                    events.extend(tick_events);

                    substeps += 1;
                    if substeps >= MAX_SUBSTEPS {
                        let skipped = self.scheduler.skip_to(now);
                        if skipped > 0 {
                            log::debug!("Dropped backlog of {} timers at {:?}", skipped, now);
                        }
                        break;
                    }
                }
                TimerKind::Spawn => {
                    if self.session.is_over() {
                        continue;
                    }
                    let fruit = spawn_fruit(&mut self.rng);
                    log::debug!("Spawned {} at x={:.1}", fruit.kind.as_str(), fruit.x);
                    self.session.objects.push(fruit);
                    events.push(GameEvent::FruitSpawned {
                        kind: fruit.kind,
                        x: fruit.x,
                    });
                }
                TimerKind::Repeat(direction) => {
                    if self.controls.owns(direction, id) && !self.session.is_over() {
                        move_player(&mut self.session.player, direction);
                    }
                }
            }
        }

        self.scheduler.set_now(now);
        events
    }

    /// Timer bookkeeping for a simulation event
    fn react(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::DifficultyIncreased { spawn_interval_ms } => {
                if let Some(id) = self.spawn_timer {
                    self.scheduler.rearm(id, spawn_period(spawn_interval_ms));
                }
            }
            GameEvent::GameOver { .. } => self.stop_timers(),
            GameEvent::FruitSpawned { .. } | GameEvent::FruitsMissed { .. } => {}
        }
    }

    /// Apply one input event. Quit is left to the front end.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(direction) => {
                if !self.session.is_over() {
                    move_player(&mut self.session.player, direction);
                }
            }
            InputEvent::HoldStart(direction) => {
                let started = self.controls.press(direction, &mut self.scheduler);
                if started && !self.session.is_over() {
                    move_player(&mut self.session.player, direction);
                }
            }
            InputEvent::HoldEnd(direction) => {
                self.controls.release(direction, &mut self.scheduler);
            }
            InputEvent::Abandon => self.controls.release_all(&mut self.scheduler),
            InputEvent::Restart => {
                if self.session.is_over() {
                    self.restart();
                }
            }
            InputEvent::Quit => {}
        }
    }

    /// Replace the session with a fresh one. The best-scores table is untouched.
    pub fn restart(&mut self) {
        self.stop_timers();
        self.session = GameSession::new(self.settings.session_config());
        self.score_submitted = false;
        self.start_timers();
        log::info!("New session started");
    }

    /// Rank the finished session's score would take if submitted now
    pub fn pending_rank(&self) -> Option<usize> {
        if !self.session.is_over() || self.score_submitted {
            return None;
        }
        self.high_scores.potential_rank(self.session.score)
    }

    /// Whether the finished session's score would enter the table
    pub fn final_score_qualifies(&self) -> bool {
        self.pending_rank().is_some()
    }

    /// Offer the finished session's score to the table, persisting on success.
    ///
    /// Only once per session, and only after game over. Returns the rank.
    pub fn submit_score(&mut self, name: &str) -> Option<usize> {
        if !self.session.is_over() || self.score_submitted {
            return None;
        }
        self.score_submitted = true;

        let rank = self.high_scores.record_attempt(self.session.score, name)?;
        log::info!("Score {} recorded at rank {}", self.session.score, rank);
        self.high_scores.save_to(&mut self.store);
        Some(rank)
    }
}
