//! Block Dodger - dodge falling rocks, collect coins, survive the levels
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player state machine, spawners, scoring)
//! - `scene`: Boot -> Start -> World -> GameOver flow and presentation state
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound cues (Web Audio on wasm32)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use scene::{Scene, SceneManager};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Per-tick rules (jump cut) are tuned for 60 Hz.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible area in world pixels (y grows downward)
    pub const WIDTH: f32 = 160.0;
    pub const HEIGHT: f32 = 160.0;

    /// Ground strip drawn along the bottom edge
    pub const GROUND_HEIGHT: f32 = 25.0;

    /// Player body and spawn point
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    pub const PLAYER_BODY_WIDTH: f32 = 16.0;
    pub const PLAYER_BODY_HEIGHT: f32 = 24.0;
    /// Bottom of the player's movement bounds (sits inside the ground strip)
    pub const PLAYER_FLOOR_Y: f32 = 152.0;

    /// Rock collision circle before scaling
    pub const ROCK_BASE_RADIUS: f32 = 8.0;
    /// Rocks spawn this far above the top edge
    pub const ROCK_SPAWN_Y: f32 = -100.0;
    pub const ROCK_MASS: f32 = 10.0;
    /// Frames in the boulder sheet
    pub const ROCK_FRAME_COUNT: u32 = 3722;

    /// Coin body size
    pub const COIN_SIZE: f32 = 12.0;
    /// Coins spawn this far outside the left/right edge
    pub const COIN_SPAWN_MARGIN: f32 = 50.0;
}

/// Screen-space angle of a vector in [0, 2π).
///
/// With y pointing down, anything in the upper half-plane (y < 0) lands in
/// (π, 2π), a vector pointing straight left is exactly π.
#[inline]
pub fn screen_angle(v: Vec2) -> f32 {
    let angle = v.y.atan2(v.x);
    if angle < 0.0 {
        angle + std::f32::consts::TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_screen_angle_quadrants() {
        assert!(screen_angle(Vec2::new(1.0, 0.0)).abs() < 1e-6);
        assert!((screen_angle(Vec2::new(0.0, 1.0)) - PI / 2.0).abs() < 1e-6);
        assert!((screen_angle(Vec2::new(-1.0, 0.0)) - PI).abs() < 1e-6);
        assert!((screen_angle(Vec2::new(0.0, -1.0)) - 3.0 * PI / 2.0).abs() < 1e-6);
    }
}
