//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a run can be
//! re-tuned from JSON without touching the rules.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal walk speed (px/s)
    pub walk_speed: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_force: f32,
    /// Per-tick multiplier on upward velocity while jump is released
    pub jump_cut: f32,
    /// Player gravity (px/s²)
    pub player_gravity: f32,
    /// Starting and maximum health
    pub max_health: i32,
    /// Health lost per qualifying rock hit
    pub rock_damage: i32,
    /// Hurt grace period (ms)
    pub grace_period_ms: f32,

    // === Scoring ===
    /// Points needed per level (threshold = level * points_per_level)
    pub points_per_level: u32,
    /// Points for collecting a coin
    pub coin_points: u32,
    /// Points for a rock leaving the bottom of the screen
    pub rock_points: u32,

    // === Rocks ===
    /// Base interval between rock spawns (ms)
    pub rock_interval_ms: f32,
    /// Time-scale added to the rock timer on each level-up
    pub rock_time_scale_step: f32,
    /// Rock sprite scale range [min, max)
    pub rock_scale_min: f32,
    pub rock_scale_max: f32,
    /// Rock gravity range [min, max)
    pub rock_gravity_min: f32,
    pub rock_gravity_max: f32,

    // === Coins ===
    /// Interval between coin spawns (ms)
    pub coin_interval_ms: f32,
    /// Horizontal coin speed (px/s)
    pub coin_speed: f32,
    /// Whether coins that leave the screen uncollected are removed
    pub despawn_stray_coins: bool,

    // === World flow ===
    /// Camera fade-out after death (ms)
    pub death_fade_ms: f32,
    /// Delay from death to the game over scene (ms)
    pub game_over_delay_ms: f32,
    /// Camera shake on hurt
    pub hurt_shake_ms: f32,
    pub hurt_shake_intensity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: 150.0,
            jump_force: 300.0,
            jump_cut: 0.8,
            player_gravity: 500.0,
            max_health: 100,
            rock_damage: 10,
            grace_period_ms: 750.0,

            points_per_level: 50,
            coin_points: 10,
            rock_points: 1,

            rock_interval_ms: 2000.0,
            rock_time_scale_step: 2.0,
            rock_scale_min: 0.6,
            rock_scale_max: 2.1,
            rock_gravity_min: 75.0,
            rock_gravity_max: 125.0,

            coin_interval_ms: 5000.0,
            coin_speed: 20.0,
            despawn_stray_coins: true,

            death_fade_ms: 2750.0,
            game_over_delay_ms: 3000.0,
            hurt_shake_ms: 50.0,
            hurt_shake_intensity: 0.01,
        }
    }
}

impl Tuning {
    /// Parse tuning JSON, falling back to defaults on malformed input.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Serialize for editing/sharing
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "walk_speed": 200.0 }"#);
        assert_eq!(tuning.walk_speed, 200.0);
        assert_eq!(tuning.jump_force, 300.0);
        assert_eq!(tuning.grace_period_ms, 750.0);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_json_export_reloads() {
        let mut tuning = Tuning::default();
        tuning.coin_points = 25;
        let reloaded = Tuning::from_json(&tuning.to_json());
        assert_eq!(reloaded.coin_points, 25);
    }
}
