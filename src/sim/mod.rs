//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod anim;
pub mod autopilot;
pub mod body;
pub mod collision;
pub mod event;
pub mod health;
pub mod input;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use anim::{Animator, Clip, ClipDef};
pub use autopilot::autopilot_input;
pub use body::{Blocked, Body, Rect, Shape};
pub use collision::{Contact, filter_collision};
pub use event::{GameEvent, PointSource};
pub use health::Health;
pub use input::{KeyEdge, TickInput};
pub use player::{Facing, Player, PlayerState};
pub use spawner::{CoinSpawner, RockSpawner};
pub use state::{Coin, GameState, Rock};
pub use tick::tick;
pub use timer::Timer;
