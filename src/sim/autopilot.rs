//! Idle/demo mode: a simple bot that plays the game
//!
//! Dodges the nearest rock that is coming down on the player, otherwise
//! chases coins. Good enough for attract mode and headless soak runs.

use super::input::TickInput;
use super::state::GameState;
use crate::consts::*;

/// Extra horizontal clearance kept from a falling rock
const DODGE_MARGIN: f32 = 12.0;
/// Stay this far from the walls when running away
const WALL_MARGIN: f32 = 20.0;

/// Pick the input for the next tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player.body;
    let half_width = player.shape.half_extents().x;
    let px = player.pos.x;

    // Most urgent threat: the lowest rock above us within striking distance
    let threat = state
        .rocks
        .iter()
        .filter(|r| r.body.pos.y < player.pos.y)
        .filter(|r| (r.body.pos.x - px).abs() < r.radius() + half_width + DODGE_MARGIN)
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y));

    if let Some(rock) = threat {
        let mut direction = if rock.body.pos.x > px { -1 } else { 1 };
        if px < WALL_MARGIN {
            direction = 1;
        } else if px > WIDTH - WALL_MARGIN {
            direction = -1;
        }
        return TickInput {
            jump: false,
            left: direction < 0,
            right: direction > 0,
        };
    }

    // Go get the nearest coin that is on screen
    let target = state
        .coins
        .iter()
        .filter(|c| (0.0..=WIDTH).contains(&c.body.pos.x))
        .min_by(|a, b| {
            let da = (a.body.pos.x - px).abs();
            let db = (b.body.pos.x - px).abs();
            da.total_cmp(&db)
        });

    let Some(coin) = target else {
        return TickInput::default();
    };

    let dx = coin.body.pos.x - px;
    let above = coin.body.pos.y < player.pos.y - PLAYER_BODY_HEIGHT / 2.0;
    TickInput {
        jump: above && dx.abs() < 24.0,
        left: dx < -4.0,
        right: dx > 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Rock};
    use crate::sim::tick;
    use glam::Vec2;

    #[test]
    fn test_dodges_rock_coming_from_the_right() {
        let mut state = GameState::new(1);
        let pos = state.player.body.pos;
        state
            .rocks
            .push(Rock::new(1, pos + Vec2::new(6.0, -40.0), 1.0, 100.0));
        let input = autopilot_input(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_runs_away_from_wall() {
        let mut state = GameState::new(1);
        state.player.body.pos.x = 10.0;
        let pos = state.player.body.pos;
        state
            .rocks
            .push(Rock::new(1, pos + Vec2::new(-2.0, -40.0), 1.0, 100.0));
        let input = autopilot_input(&state);
        assert!(input.right);
    }

    #[test]
    fn test_chases_coin_when_safe() {
        let mut state = GameState::new(1);
        let pos = state.player.body.pos;
        state.coins.push(Coin::new(1, Vec2::new(pos.x - 40.0, pos.y), 20.0));
        let input = autopilot_input(&state);
        assert!(input.left);
        assert!(!input.jump);
    }

    #[test]
    fn test_idle_with_nothing_around() {
        let state = GameState::new(1);
        assert_eq!(autopilot_input(&state), TickInput::default());
    }

    #[test]
    fn test_autopilot_soak_is_stable() {
        let mut state = GameState::new(2024);
        for _ in 0..60 * 60 {
            let input = autopilot_input(&state);
            tick(&mut state, &input, SIM_DT);
            state.events.clear();
        }
        let p = &state.player;
        assert!(p.health.current() >= 0 && p.health.current() <= p.health.max());
        assert!(p.level >= 1);
        assert!(p.body.pos.x >= 0.0 && p.body.pos.x <= WIDTH);
    }
}
