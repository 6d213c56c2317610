//! Fixed timestep simulation tick
//!
//! Advances fruit, credits survival score, checks collisions and escalates
//! difficulty as one indivisible step.

use super::spawn::{escalate, thresholds_crossed};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::*;

/// Advance the session by one fixed timestep
///
/// Does nothing once the session is over. Score from fruit leaving the field
/// is kept even on the tick that ends the game.
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.phase == GamePhase::GameOver {
        return events;
    }

    session.ticks += 1;

    for fruit in &mut session.objects {
        fruit.y += FALL_SPEED;
    }

    // Fruit past the bottom are survival credit
    let before = session.objects.len();
    session.objects.retain(|f| !f.is_out());
    let missed = (before - session.objects.len()) as u64;
    let prev_score = session.score;
    if missed > 0 {
        session.score += missed;
        events.push(GameEvent::FruitsMissed { count: missed });
    }

    let player_x = session.player.x;
    if session.objects.iter().any(|f| f.hits(player_x)) {
        session.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, score {}",
            session.ticks,
            session.score
        );
        events.push(GameEvent::GameOver {
            score: session.score,
        });
    }

    // Edge-triggered: once per multiple of ESCALATION_STEP crossed this tick
    let crossings = thresholds_crossed(prev_score, session.score);
    if crossings > 0 {
        let next = escalate(
            session.spawn_interval_ms,
            session.config.spawn_interval_floor_ms,
            crossings,
        );
        if next < session.spawn_interval_ms {
            log::debug!(
                "Score {}: spawn interval {:.0}ms -> {:.0}ms",
                session.score,
                session.spawn_interval_ms,
                next
            );
            session.spawn_interval_ms = next;
            events.push(GameEvent::DifficultyIncreased {
                spawn_interval_ms: next,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, FruitKind, SessionConfig};
    use proptest::prelude::*;

    fn arcade_session() -> GameSession {
        GameSession::new(SessionConfig {
            initial_spawn_interval_ms: 1000.0,
            spawn_interval_floor_ms: 100.0,
        })
    }

    fn fruit_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            kind: FruitKind::Apple,
            x,
            y,
        }
    }

    #[test]
    fn test_fruit_falls() {
        let mut session = arcade_session();
        session.objects.push(fruit_at(10.0, 0.0));
        let events = tick(&mut session);
        assert!(events.is_empty());
        assert_eq!(session.objects[0].y, FALL_SPEED);
        assert_eq!(session.ticks, 1);
    }

    #[test]
    fn test_missed_fruit_scores() {
        let mut session = arcade_session();
        session.objects.push(fruit_at(10.0, 99.0));
        session.objects.push(fruit_at(20.0, 50.0));
        let events = tick(&mut session);
        assert_eq!(session.score, 1);
        assert_eq!(session.objects.len(), 1);
        assert_eq!(session.objects[0].x, 20.0);
        assert_eq!(events, vec![GameEvent::FruitsMissed { count: 1 }]);
    }

    #[test]
    fn test_collision_below_threshold_row() {
        let mut session = arcade_session();
        session.objects.push(fruit_at(52.0, 89.0));
        let events = tick(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_no_collision_above_threshold_row() {
        let mut session = arcade_session();
        // Lands exactly on the threshold row: not yet past it
        session.objects.push(fruit_at(50.0, 84.0));
        tick(&mut session);
        assert_eq!(session.phase, GamePhase::Playing);
        tick(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_collision_when_far() {
        let mut session = arcade_session();
        session.objects.push(fruit_at(58.0, 95.0));
        session.objects.push(fruit_at(42.0, 95.0));
        tick(&mut session);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_collision_tick_keeps_score() {
        let mut session = arcade_session();
        session.score = 4;
        session.objects.push(fruit_at(0.0, 99.5));
        session.objects.push(fruit_at(50.0, 89.0));
        let events = tick(&mut session);
        assert_eq!(session.score, 5);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![
                GameEvent::FruitsMissed { count: 1 },
                GameEvent::GameOver { score: 5 }
            ]
        );
    }

    #[test]
    fn test_game_over_freezes() {
        let mut session = arcade_session();
        session.phase = GamePhase::GameOver;
        session.score = 3;
        session.objects.push(fruit_at(10.0, 99.0));
        let events = tick(&mut session);
        assert!(events.is_empty());
        assert_eq!(session.objects[0].y, 99.0);
        assert_eq!(session.score, 3);
        assert_eq!(session.ticks, 0);
    }

    #[test]
    fn test_escalation_once_per_crossing() {
        let mut session = arcade_session();
        session.score = 9;
        session.objects.push(fruit_at(10.0, 99.0));
        tick(&mut session);
        assert_eq!(session.score, 10);
        assert_eq!(session.spawn_interval_ms, 900.0);

        // Score stays at 10 for many ticks: no further shrink
        for _ in 0..50 {
            tick(&mut session);
        }
        assert_eq!(session.score, 10);
        assert_eq!(session.spawn_interval_ms, 900.0);

        // Moving past 10 without reaching 20: no shrink
        session.objects.push(fruit_at(10.0, 99.0));
        tick(&mut session);
        assert_eq!(session.score, 11);
        assert_eq!(session.spawn_interval_ms, 900.0);
    }

    #[test]
    fn test_escalation_jump_over_threshold() {
        let mut session = arcade_session();
        session.score = 8;
        for _ in 0..3 {
            session.objects.push(fruit_at(10.0, 99.0));
        }
        let events = tick(&mut session);
        assert_eq!(session.score, 11);
        assert_eq!(session.spawn_interval_ms, 900.0);
        assert!(events.contains(&GameEvent::DifficultyIncreased {
            spawn_interval_ms: 900.0
        }));
    }

    #[test]
    fn test_escalation_respects_floor() {
        let mut session = GameSession::new(SessionConfig {
            initial_spawn_interval_ms: 520.0,
            spawn_interval_floor_ms: 500.0,
        });
        session.score = 9;
        session.objects.push(fruit_at(10.0, 99.0));
        tick(&mut session);
        assert_eq!(session.spawn_interval_ms, 500.0);

        session.score = 19;
        session.objects.push(fruit_at(10.0, 99.0));
        let events = tick(&mut session);
        assert_eq!(session.spawn_interval_ms, 500.0);
        assert_eq!(events, vec![GameEvent::FruitsMissed { count: 1 }]);
    }

    proptest! {
        #[test]
        fn prop_score_counts_exits(
            spawn_ys in prop::collection::vec(0u8..100, 0..40),
            ticks in 0usize..150,
        ) {
            let mut session = arcade_session();
            session.player.x = 0.0;
            for (i, y) in spawn_ys.iter().enumerate() {
                // Keep every fruit at least COLLISION_THRESHOLD away from the player
                session.objects.push(fruit_at(10.0 + (i % 80) as f32, *y as f32));
            }
            let mut prev_interval = session.spawn_interval_ms;
            for _ in 0..ticks {
                tick(&mut session);
                prop_assert!(session.spawn_interval_ms <= prev_interval);
                prev_interval = session.spawn_interval_ms;
            }
            let exited = spawn_ys
                .iter()
                .filter(|y| **y as usize + ticks >= 100)
                .count() as u64;
            prop_assert_eq!(session.score, exited);
            prop_assert_eq!(session.objects.len() as u64, spawn_ys.len() as u64 - exited);
            prop_assert!(session.objects.iter().all(|f| f.y < FIELD_BOTTOM));
            prop_assert_eq!(session.phase, GamePhase::Playing);
            let expected = escalate(1000.0, 100.0, session.score / ESCALATION_STEP);
            prop_assert_eq!(session.spawn_interval_ms, expected);
        }

        #[test]
        fn prop_collision_iff_hit(x in 0.0f32..95.0, y in 0u8..99, player_x in 0.0f32..95.0) {
            let mut session = arcade_session();
            session.player.x = player_x;
            session.objects.push(fruit_at(x, y as f32));
            tick(&mut session);
            let new_y = y as f32 + FALL_SPEED;
            let expected = new_y > PLAYER_Y_THRESHOLD && (x - player_x).abs() < COLLISION_THRESHOLD;
            prop_assert_eq!(session.phase == GamePhase::GameOver, expected);
        }
    }
}
