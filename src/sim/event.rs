//! Gameplay notifications emitted by the simulation
//!
//! The scene layer drains these after every tick to drive audio, camera and
//! HUD side effects.

/// Where awarded points came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    Coins,
    Rocks,
}

impl PointSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointSource::Coins => "coins",
            PointSource::Rocks => "rocks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground
    Jump,
    /// Point total changed
    Points { total: u32, source: PointSource },
    /// Player took a hit
    Hurt { health: i32, max: i32 },
    /// Health reached zero
    Die,
    /// Level threshold crossed
    LevelIncrease { level: u32 },
}
