//! Player state machine, movement rules and scoring

use glam::Vec2;

use super::anim::{Animator, Clip};
use super::body::{Body, Rect};
use super::event::{GameEvent, PointSource};
use super::health::Health;
use super::input::{KeyEdge, TickInput};
use super::timer::Timer;
use crate::Tuning;
use crate::consts::*;

/// Behavioral mode of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Responds to input
    Active,
    /// Grace period after a hit; input ignored
    Hurt,
    /// Terminal; only the defeat animation plays
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub state: PlayerState,
    pub health: Health,
    pub points: u32,
    pub level: u32,
    pub facing: Facing,
    pub body: Body,
    pub anim: Animator,
    jump_key: KeyEdge,
    /// Pending Hurt -> Active transition
    grace: Option<Timer>,
    walk_speed: f32,
    jump_force: f32,
    jump_cut: f32,
    rock_damage: i32,
    grace_period_ms: f32,
    points_per_level: u32,
    coin_points: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::rect(pos, PLAYER_BODY_WIDTH, PLAYER_BODY_HEIGHT);
        body.gravity_y = tuning.player_gravity;
        body.bounds = Some(Rect::new(0.0, 0.0, WIDTH, PLAYER_FLOOR_Y));

        Self {
            state: PlayerState::Active,
            health: Health::new(tuning.max_health, tuning.max_health),
            points: 0,
            level: 1,
            facing: Facing::Right,
            body,
            anim: Animator::new(),
            jump_key: KeyEdge::default(),
            grace: None,
            walk_speed: tuning.walk_speed,
            jump_force: tuning.jump_force,
            jump_cut: tuning.jump_cut,
            rock_damage: tuning.rock_damage,
            grace_period_ms: tuning.grace_period_ms,
            points_per_level: tuning.points_per_level,
            coin_points: tuning.coin_points,
        }
    }

    /// Hurt or Dead: hazards cannot damage the player
    pub fn is_damaged(&self) -> bool {
        matches!(self.state, PlayerState::Hurt | PlayerState::Dead)
    }

    /// Milliseconds left in the grace period, if one is pending
    pub fn grace_remaining_ms(&self) -> Option<f32> {
        self.grace
            .as_ref()
            .map(|t| (t.delay_ms - t.elapsed_ms).max(0.0))
    }

    /// Points needed to pass the current level
    pub fn level_threshold(&self) -> u32 {
        self.level * self.points_per_level
    }

    /// Per-tick behavior; runs before the physics step
    pub fn update(&mut self, input: &TickInput, dt_ms: f32, events: &mut Vec<GameEvent>) {
        self.jump_key.update(input.jump);
        self.anim.advance(dt_ms);

        let grace_expired = self.grace.as_mut().is_some_and(|t| t.advance(dt_ms));
        if grace_expired {
            self.grace = None;
            if self.state == PlayerState::Hurt {
                self.state = PlayerState::Active;
            }
        }

        let direction = input.direction();
        match self.state {
            PlayerState::Hurt => {
                self.body.vel.x = 0.0;
                self.anim.play(Clip::HeroHurt, true);
            }
            PlayerState::Dead => {
                self.body.vel.x = 0.0;
                self.anim.play(Clip::HeroDefeat, true);
            }
            PlayerState::Active => {
                if self.body.on_floor() || self.body.on_wall() {
                    self.update_grounded(direction, events);
                } else {
                    self.update_airborne(direction, input.jump);
                }
            }
        }
    }

    fn update_grounded(&mut self, direction: i32, events: &mut Vec<GameEvent>) {
        if self.jump_key.pressed {
            self.body.vel.y = -self.jump_force;
            self.anim.play(Clip::HeroUp, true);
            events.push(GameEvent::Jump);
        } else if direction != 0 {
            self.walk(direction);
            self.anim.play(Clip::HeroWalk, true);
        } else {
            self.body.vel.x = 0.0;
            if !self.anim.current().is_some_and(Clip::is_idle) {
                self.anim.play(Clip::HeroIdle, true);
            }
        }
    }

    fn update_airborne(&mut self, direction: i32, jump_held: bool) {
        if direction != 0 {
            self.walk(direction);
        } else {
            self.body.vel.x = 0.0;
        }

        if self.body.vel.y > 0.0 && !self.anim.is_playing(Clip::HeroFall) {
            self.anim.play(Clip::HeroFall, true);
        } else if self.body.vel.y < 0.0 && !jump_held {
            // Variable jump height: releasing early shortens the hop
            self.body.vel.y *= self.jump_cut;
        }
    }

    fn walk(&mut self, direction: i32) {
        self.body.vel.x = direction as f32 * self.walk_speed;
        self.facing = if direction < 0 {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    fn enter_state(&mut self, state: PlayerState) {
        log::debug!("Player {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// A qualifying rock hit. The caller removes the rock.
    pub fn on_collide_with_rock(&mut self, events: &mut Vec<GameEvent>) {
        if self.health.apply_delta(-self.rock_damage) {
            self.enter_state(PlayerState::Dead);
            self.grace = None;
            log::info!("Player died with {} points at level {}", self.points, self.level);
            events.push(GameEvent::Die);
        } else {
            self.enter_state(PlayerState::Hurt);
            // A fresh hit replaces any pending recovery
            self.grace = Some(Timer::once(self.grace_period_ms));
        }
        events.push(GameEvent::Hurt {
            health: self.health.current(),
            max: self.health.max(),
        });
    }

    /// A coin overlap. The caller removes the coin.
    pub fn on_overlap_with_coin(&mut self, events: &mut Vec<GameEvent>) {
        self.increase_points(self.coin_points, PointSource::Coins, events);
    }

    /// Award points, leveling up at most once per call
    pub fn increase_points(&mut self, amount: u32, source: PointSource, events: &mut Vec<GameEvent>) {
        if self.points + amount > self.level_threshold() {
            self.increase_level(events);
        }
        self.points += amount;
        events.push(GameEvent::Points {
            total: self.points,
            source,
        });
    }

    fn increase_level(&mut self, events: &mut Vec<GameEvent>) {
        self.level += 1;
        log::info!("Level up -> {}", self.level);
        events.push(GameEvent::LevelIncrease { level: self.level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT_MS: f32 = 1000.0 / 60.0;

    fn player() -> Player {
        Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y), &Tuning::default())
    }

    /// Player standing on the floor
    fn grounded_player() -> Player {
        let mut p = player();
        p.body.blocked.down = true;
        p
    }

    #[test]
    fn test_starts_active_with_full_health() {
        let p = player();
        assert_eq!(p.state, PlayerState::Active);
        assert_eq!(p.health.current(), 100);
        assert_eq!(p.points, 0);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_hit_enters_hurt() {
        let mut p = player();
        let mut events = Vec::new();
        p.on_collide_with_rock(&mut events);
        assert_eq!(p.state, PlayerState::Hurt);
        assert_eq!(p.health.current(), 90);
        assert_eq!(events, vec![GameEvent::Hurt { health: 90, max: 100 }]);
    }

    #[test]
    fn test_ten_hits_kill_and_die_emitted_once() {
        let mut p = player();
        let mut events = Vec::new();
        for _ in 0..10 {
            p.on_collide_with_rock(&mut events);
        }
        assert_eq!(p.state, PlayerState::Dead);
        assert_eq!(p.health.current(), 0);
        let deaths = events.iter().filter(|e| **e == GameEvent::Die).count();
        assert_eq!(deaths, 1);
        assert_eq!(p.grace_remaining_ms(), None);
    }

    #[test]
    fn test_hurt_ignores_input_and_recovers_after_grace() {
        let mut p = grounded_player();
        let mut events = Vec::new();
        p.on_collide_with_rock(&mut events);
        events.clear();

        let input = TickInput {
            jump: true,
            right: true,
            ..Default::default()
        };
        // 44 ticks ≈ 733 ms: still hurt
        for _ in 0..44 {
            p.update(&input, DT_MS, &mut events);
            assert_eq!(p.body.vel.x, 0.0);
            assert_eq!(p.state, PlayerState::Hurt);
        }
        assert!(p.anim.is_playing(Clip::HeroHurt));
        assert!(events.is_empty());

        // Crossing 750 ms restores control
        p.update(&input, DT_MS, &mut events);
        p.update(&input, DT_MS, &mut events);
        assert_eq!(p.state, PlayerState::Active);
        assert_eq!(p.body.vel.x, 150.0);
    }

    #[test]
    fn test_rehurt_replaces_grace_timer() {
        let mut p = player();
        let mut events = Vec::new();
        p.on_collide_with_rock(&mut events);
        for _ in 0..30 {
            p.update(&TickInput::default(), DT_MS, &mut events);
        }
        p.on_collide_with_rock(&mut events);
        assert_eq!(p.grace_remaining_ms(), Some(750.0));
        // The first timer would have expired here; the replacement has not
        for _ in 0..20 {
            p.update(&TickInput::default(), DT_MS, &mut events);
        }
        assert_eq!(p.state, PlayerState::Hurt);
    }

    #[test]
    fn test_dead_plays_defeat_and_ignores_input() {
        let mut p = grounded_player();
        p.health.set(10);
        let mut events = Vec::new();
        p.on_collide_with_rock(&mut events);
        assert_eq!(events[0], GameEvent::Die);

        let input = TickInput {
            jump: true,
            left: true,
            ..Default::default()
        };
        p.update(&input, DT_MS, &mut events);
        assert_eq!(p.state, PlayerState::Dead);
        assert_eq!(p.body.vel.x, 0.0);
        assert!(p.anim.is_playing(Clip::HeroDefeat));
        assert!(!events.contains(&GameEvent::Jump));
    }

    #[test]
    fn test_grounded_jump_on_rising_edge_only() {
        let mut p = grounded_player();
        let mut events = Vec::new();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        p.update(&jump, DT_MS, &mut events);
        assert_eq!(p.body.vel.y, -300.0);
        assert!(p.anim.is_playing(Clip::HeroUp));
        assert_eq!(events, vec![GameEvent::Jump]);

        // Holding jump while still grounded does not re-trigger
        p.body.vel.y = 0.0;
        events.clear();
        p.update(&jump, DT_MS, &mut events);
        assert_eq!(p.body.vel.y, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_grounded_walk_sets_facing() {
        let mut p = grounded_player();
        let mut events = Vec::new();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        p.update(&left, DT_MS, &mut events);
        assert_eq!(p.body.vel.x, -150.0);
        assert_eq!(p.facing, Facing::Left);
        assert!(p.anim.is_playing(Clip::HeroWalk));
    }

    #[test]
    fn test_grounded_idle_does_not_restart() {
        let mut p = grounded_player();
        let mut events = Vec::new();
        p.update(&TickInput::default(), DT_MS, &mut events);
        assert!(p.anim.is_playing(Clip::HeroIdle));
        for _ in 0..10 {
            p.update(&TickInput::default(), DT_MS, &mut events);
        }
        // 10 ticks ≈ 167 ms at 7 fps: idle advanced past its first frame
        assert_eq!(p.anim.frame(), 1);
        assert_eq!(p.body.vel.x, 0.0);
    }

    #[test]
    fn test_airborne_jump_cut_when_released() {
        let mut p = player();
        p.body.vel.y = -200.0;
        let mut events = Vec::new();
        p.update(&TickInput::default(), DT_MS, &mut events);
        assert!((p.body.vel.y - -160.0).abs() < 1e-3);

        // Held jump keeps full upward speed
        p.body.vel.y = -200.0;
        let held = TickInput {
            jump: true,
            ..Default::default()
        };
        p.update(&held, DT_MS, &mut events);
        assert_eq!(p.body.vel.y, -200.0);
    }

    #[test]
    fn test_airborne_falling_plays_fall_and_steers() {
        let mut p = player();
        p.body.vel.y = 50.0;
        let mut events = Vec::new();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        p.update(&right, DT_MS, &mut events);
        assert!(p.anim.is_playing(Clip::HeroFall));
        assert_eq!(p.body.vel.x, 150.0);
        assert_eq!(p.facing, Facing::Right);

        p.update(&TickInput::default(), DT_MS, &mut events);
        assert_eq!(p.body.vel.x, 0.0);
    }

    #[test]
    fn test_increase_points_levels_once() {
        let mut p = player();
        p.points = 40;
        let mut events = Vec::new();
        p.increase_points(30, PointSource::Coins, &mut events);
        assert_eq!(p.level, 2);
        assert_eq!(p.points, 70);
        assert_eq!(
            events,
            vec![
                GameEvent::LevelIncrease { level: 2 },
                GameEvent::Points {
                    total: 70,
                    source: PointSource::Coins
                },
            ]
        );

        // Crossing several thresholds at once still advances one level
        events.clear();
        p.increase_points(1000, PointSource::Rocks, &mut events);
        assert_eq!(p.level, 3);
        assert_eq!(p.points, 1070);
    }

    #[test]
    fn test_reaching_threshold_exactly_does_not_level() {
        let mut p = player();
        let mut events = Vec::new();
        p.increase_points(50, PointSource::Rocks, &mut events);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_coin_awards_ten() {
        let mut p = player();
        let mut events = Vec::new();
        p.on_overlap_with_coin(&mut events);
        assert_eq!(p.points, 10);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Points {
                total: 10,
                source: PointSource::Coins
            })
        );
    }
}
