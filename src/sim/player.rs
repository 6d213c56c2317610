//! Player movement

use super::state::{Direction, Player};
use crate::consts::*;

/// Step the player one PLAYER_STEP toward `direction`, clamped to the field.
///
/// Facing always follows the request, even when the player is already
/// against the bound and does not move.
pub fn move_player(player: &mut Player, direction: Direction) {
    player.facing = direction;
    player.x = (player.x + direction.sign() * PLAYER_STEP).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_move_left_at_bound_sets_facing() {
        let mut player = Player {
            x: 0.0,
            facing: Direction::Right,
        };
        move_player(&mut player, Direction::Left);
        assert_eq!(player.x, 0.0);
        assert_eq!(player.facing, Direction::Left);
    }

    #[test]
    fn test_move_right_clamps() {
        let mut player = Player {
            x: 93.0,
            facing: Direction::Left,
        };
        move_player(&mut player, Direction::Right);
        assert_eq!(player.x, PLAYER_MAX_X);
        assert_eq!(player.facing, Direction::Right);
    }

    #[test]
    fn test_move_steps() {
        let mut player = Player::default();
        move_player(&mut player, Direction::Left);
        assert_eq!(player.x, 45.0);
        move_player(&mut player, Direction::Right);
        move_player(&mut player, Direction::Right);
        assert_eq!(player.x, 55.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..200)) {
            let mut player = Player::default();
            for left in moves {
                let dir = if left { Direction::Left } else { Direction::Right };
                move_player(&mut player, dir);
                prop_assert!(player.x >= PLAYER_MIN_X && player.x <= PLAYER_MAX_X);
                prop_assert_eq!(player.facing, dir);
            }
        }
    }
}
