//! Fixed timestep simulation tick
//!
//! Core game loop that advances a World session deterministically.

use super::collision::{
    despawn_fallen_rocks, despawn_stray_coins, resolve_coin_overlaps, resolve_rock_collisions,
};
use super::event::GameEvent;
use super::input::TickInput;
use super::state::GameState;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt_ms = dt * 1000.0;
    state.time_ticks += 1;
    let first_event = state.events.len();

    // Player reads last step's contact flags before physics moves it
    state.player.update(input, dt_ms, &mut state.events);

    state.player.body.integrate(dt);
    for rock in &mut state.rocks {
        rock.body.integrate(dt);
    }
    for coin in &mut state.coins {
        coin.body.integrate(dt);
        coin.anim.advance(dt_ms);
    }

    resolve_rock_collisions(state);
    resolve_coin_overlaps(state);
    despawn_fallen_rocks(state);
    if state.tuning.despawn_stray_coins {
        despawn_stray_coins(state);
    }

    if state.rock_spawner.timer.advance(dt_ms) {
        state.spawn_rock();
    }
    if state.coin_spawner.timer.advance(dt_ms) {
        state.spawn_coin();
    }

    let level_ups = state.events[first_event..]
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelIncrease { .. }))
        .count();
    for _ in 0..level_ups {
        state.rock_spawner.speed_up();
    }
}
