//! Contact filtering and resolution between the player and world entities
//!
//! Rocks only hurt when they land on the player from above while still
//! moving, and never during the grace window. Coins always count.

use std::f32::consts::PI;

use super::event::PointSource;
use super::player::Player;
use super::state::{GameState, Rock};
use crate::consts::*;
use crate::screen_angle;

/// One side of a contact pair, in whatever order the broadphase reports it
#[derive(Debug, Clone, Copy)]
pub enum Contact<'a> {
    Player(&'a Player),
    Rock(&'a Rock),
}

/// Sort a contact pair into (player, rock)
fn hazard_pair<'a>(a: Contact<'a>, b: Contact<'a>) -> Option<(&'a Player, &'a Rock)> {
    match (a, b) {
        (Contact::Player(player), Contact::Rock(rock))
        | (Contact::Rock(rock), Contact::Player(player)) => Some((player, rock)),
        _ => None,
    }
}

/// Whether a player/rock contact should be resolved as damage
pub fn filter_collision(a: Contact<'_>, b: Contact<'_>) -> bool {
    let Some((player, rock)) = hazard_pair(a, b) else {
        return false;
    };

    let to_rock = rock.body.pos - player.body.pos;
    let is_above_player = screen_angle(to_rock) >= PI;

    is_above_player && !player.is_damaged() && rock.body.is_moving()
}

/// Damage the player for each qualifying rock contact, removing the rock
pub fn resolve_rock_collisions(state: &mut GameState) {
    let mut i = 0;
    while i < state.rocks.len() {
        let rock = &state.rocks[i];
        let hit = state.player.body.overlaps(&rock.body)
            && filter_collision(Contact::Player(&state.player), Contact::Rock(rock));
        if hit {
            let rock = state.rocks.remove(i);
            log::debug!("Rock {} hit the player", rock.id);
            state.player.on_collide_with_rock(&mut state.events);
        } else {
            i += 1;
        }
    }
}

/// Collect every coin touching the player
pub fn resolve_coin_overlaps(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;
    state.coins.retain(|coin| {
        if player.body.overlaps(&coin.body) {
            player.on_overlap_with_coin(events);
            false
        } else {
            true
        }
    });
}

/// Remove rocks that fell past the bottom edge, one point each
pub fn despawn_fallen_rocks(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;
    let rock_points = state.tuning.rock_points;
    state.rocks.retain(|rock| {
        if rock.body.pos.y > HEIGHT {
            player.increase_points(rock_points, PointSource::Rocks, events);
            false
        } else {
            true
        }
    });
}

/// Remove coins that crossed the screen without being collected
pub fn despawn_stray_coins(state: &mut GameState) {
    state.coins.retain(|coin| {
        let half = coin.body.shape.half_extents().x;
        let x = coin.body.pos.x;
        let vx = coin.body.vel.x;
        let gone_right = vx > 0.0 && x - half > WIDTH + COIN_SPAWN_MARGIN;
        let gone_left = vx < 0.0 && x + half < -COIN_SPAWN_MARGIN;
        !(gone_right || gone_left)
    });
}
