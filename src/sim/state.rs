//! Game state and entity types
//!
//! Everything a World session owns lives here: the player, live rocks and
//! coins, both spawners, the RNG and the pending event queue.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::anim::{Animator, Clip};
use super::body::Body;
use super::event::GameEvent;
use super::player::Player;
use super::spawner::{CoinSpawner, RockSpawner};
use crate::Tuning;
use crate::consts::*;

/// A falling hazard
#[derive(Debug, Clone)]
pub struct Rock {
    pub id: u32,
    pub body: Body,
    /// Sprite scale; the collision circle scales with it
    pub scale: f32,
    pub mass: f32,
    /// Boulder sheet frame
    pub frame: u32,
}

impl Rock {
    pub fn new(id: u32, pos: Vec2, scale: f32, gravity_y: f32) -> Self {
        let mut body = Body::circle(pos, ROCK_BASE_RADIUS * scale);
        body.gravity_y = gravity_y;
        Self {
            id,
            body,
            scale,
            mass: ROCK_MASS,
            frame: 0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.body.shape.half_extents().x
    }
}

/// A horizontally drifting pickup
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub body: Body,
    pub anim: Animator,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2, vel_x: f32) -> Self {
        let mut body = Body::rect(pos, COIN_SIZE, COIN_SIZE);
        body.vel.x = vel_x;
        let mut anim = Animator::new();
        anim.play(Clip::CoinSpin, true);
        Self { id, body, anim }
    }
}

/// Complete World session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live rocks (ascending id)
    pub rocks: Vec<Rock>,
    /// Live coins (ascending id)
    pub coins: Vec<Coin>,
    pub rock_spawner: RockSpawner,
    pub coin_spawner: CoinSpawner,
    /// Notifications not yet drained by the scene
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y), &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player,
            rocks: Vec::new(),
            coins: Vec::new(),
            rock_spawner: RockSpawner::new(&tuning),
            coin_spawner: CoinSpawner::new(&tuning),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spawn_rock(&mut self) {
        let id = self.next_entity_id();
        let rock = self.rock_spawner.create(id, &mut self.rng);
        log::debug!(
            "Rock {} at x={:.1} scale={:.2} gravity={:.1}",
            rock.id,
            rock.body.pos.x,
            rock.scale,
            rock.body.gravity_y
        );
        self.rocks.push(rock);
    }

    pub fn spawn_coin(&mut self) {
        let id = self.next_entity_id();
        let coin = self.coin_spawner.create(id, &mut self.rng);
        log::debug!(
            "Coin {} at ({:.1}, {:.1}) vx={:.1}",
            coin.id,
            coin.body.pos.x,
            coin.body.pos.y,
            coin.body.vel.x
        );
        self.coins.push(coin);
    }
}
