//! Periodic rock and coin creation

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, Rock};
use super::timer::Timer;
use crate::Tuning;
use crate::consts::*;

/// Uniform sample in [min, max), tolerating a collapsed range
fn sample(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Drops rocks above the screen on a timer that speeds up with each level
#[derive(Debug, Clone)]
pub struct RockSpawner {
    pub timer: Timer,
    time_scale_step: f32,
    scale_range: (f32, f32),
    gravity_range: (f32, f32),
}

impl RockSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer: Timer::repeating(tuning.rock_interval_ms),
            time_scale_step: tuning.rock_time_scale_step,
            scale_range: (tuning.rock_scale_min, tuning.rock_scale_max),
            gravity_range: (tuning.rock_gravity_min, tuning.rock_gravity_max),
        }
    }

    /// Level-up reaction: raise the timer rate, not the interval
    pub fn speed_up(&mut self) {
        self.timer.time_scale += self.time_scale_step;
        log::info!("Rock spawn rate x{:.1}", self.timer.time_scale);
    }

    pub fn create(&self, id: u32, rng: &mut Pcg32) -> Rock {
        let x = sample(rng, 0.0, WIDTH);
        let frame = rng.random_range(0..ROCK_FRAME_COUNT);
        let scale = sample(rng, self.scale_range.0, self.scale_range.1);
        let gravity = sample(rng, self.gravity_range.0, self.gravity_range.1);

        let mut rock = Rock::new(id, Vec2::new(x, ROCK_SPAWN_Y), scale, gravity);
        rock.frame = frame;
        rock
    }
}

/// Sends coins across the screen from either side
#[derive(Debug, Clone)]
pub struct CoinSpawner {
    pub timer: Timer,
    speed: f32,
}

impl CoinSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer: Timer::repeating(tuning.coin_interval_ms),
            speed: tuning.coin_speed,
        }
    }

    pub fn create(&self, id: u32, rng: &mut Pcg32) -> Coin {
        let left_to_right = rng.random_bool(0.5);
        let x = if left_to_right {
            -COIN_SPAWN_MARGIN
        } else {
            WIDTH + COIN_SPAWN_MARGIN
        };
        let y = sample(rng, -20.0, HEIGHT - 40.0);
        let vel_x = if left_to_right { self.speed } else { -self.speed };

        Coin::new(id, Vec2::new(x, y), vel_x)
    }
}
