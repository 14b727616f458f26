//! Scene flow: Boot -> Start -> World -> GameOver
//!
//! The [`SceneManager`] owns whichever scene is active, turns raw key state
//! into edges, drives the World simulation and maps gameplay events onto
//! presentation: score text, camera shake and fade, and audio cues.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Tuning;
use crate::audio::{AudioCommand, SoundEffect};
use crate::consts::*;
use crate::sim::{
    Clip, GameEvent, GameState, KeyEdge, PointSource, TickInput, Timer, autopilot_input, tick,
};

/// Raw key state sampled once per simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    /// Restart key on the game-over screen
    pub retry: bool,
    /// Let the bot play the World scene
    pub autopilot: bool,
}

/// Final tally of a World session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub points: u32,
    pub level: u32,
    pub seed: u64,
    pub ticks: u64,
}

/// Camera effects applied on top of the fixed 160x160 view
#[derive(Debug, Clone, Default)]
pub struct Camera {
    shake: Option<(Timer, f32)>,
    fade: Option<Timer>,
    offset: Vec2,
}

impl Camera {
    /// Start shaking; intensity is a fraction of the view size
    pub fn shake(&mut self, duration_ms: f32, intensity: f32) {
        self.shake = Some((Timer::once(duration_ms), intensity));
    }

    /// Fade to black over the given duration
    pub fn fade_out(&mut self, duration_ms: f32) {
        self.fade = Some(Timer::once(duration_ms));
    }

    pub fn update(&mut self, dt_ms: f32, rng: &mut Pcg32) {
        if let Some((timer, intensity)) = &mut self.shake {
            if timer.advance(dt_ms) {
                self.shake = None;
                self.offset = Vec2::ZERO;
            } else {
                let intensity = *intensity;
                self.offset = Vec2::new(
                    rng.random_range(-1.0..=1.0) * intensity * WIDTH,
                    rng.random_range(-1.0..=1.0) * intensity * HEIGHT,
                );
            }
        }
        if let Some(fade) = &mut self.fade {
            fade.advance(dt_ms);
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Current shake displacement in world pixels
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Opacity of the black overlay, 0 when no fade is running
    pub fn fade_alpha(&self) -> f32 {
        self.fade.as_ref().map_or(0.0, |t| t.progress())
    }
}

/// The playing field and everything drawn over it
#[derive(Debug, Clone)]
pub struct WorldScene {
    pub state: GameState,
    pub camera: Camera,
    /// Top-left score label
    pub score_text: String,
    /// Armed when the player dies
    end_timer: Option<Timer>,
    /// Presentation-only randomness so shake never perturbs the simulation
    fx_rng: Pcg32,
}

impl WorldScene {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            camera: Camera::default(),
            score_text: "Score: 0".to_string(),
            end_timer: None,
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x5EED_F00D),
        }
    }

    /// Whether the death sequence is running
    pub fn is_ending(&self) -> bool {
        self.end_timer.is_some()
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            points: self.state.player.points,
            level: self.state.player.level,
            seed: self.state.seed,
            ticks: self.state.time_ticks,
        }
    }

    /// React to one gameplay notification
    fn handle_event(&mut self, event: GameEvent, shake: bool, audio: &mut Vec<AudioCommand>) {
        let tuning = &self.state.tuning;
        match event {
            GameEvent::Jump => audio.push(AudioCommand::Play(SoundEffect::Jump)),
            GameEvent::Points { total, source } => {
                self.score_text = format!("Score: {total}");
                if source == PointSource::Coins {
                    audio.push(AudioCommand::Play(SoundEffect::CoinCollected));
                }
            }
            GameEvent::Hurt { health, max } => {
                log::debug!("Player hurt: {health}/{max}");
                if shake {
                    self.camera
                        .shake(tuning.hurt_shake_ms, tuning.hurt_shake_intensity);
                }
                audio.push(AudioCommand::Play(SoundEffect::RockSmash));
            }
            GameEvent::Die => {
                log::debug!("Fading out");
                self.camera.fade_out(tuning.death_fade_ms);
                self.end_timer = Some(Timer::once(tuning.game_over_delay_ms));
            }
            GameEvent::LevelIncrease { level } => {
                log::debug!("Level-up cue for level {level}");
                audio.push(AudioCommand::Play(SoundEffect::LevelUp));
            }
        }
    }

    /// One fixed step; returns the run summary once the end timer fires
    fn step(
        &mut self,
        input: &FrameInput,
        dt: f32,
        shake: bool,
        audio: &mut Vec<AudioCommand>,
    ) -> Option<RunSummary> {
        let tick_input = if input.autopilot {
            autopilot_input(&self.state)
        } else {
            TickInput {
                jump: input.jump,
                left: input.left,
                right: input.right,
            }
        };
        tick(&mut self.state, &tick_input, dt);

        for event in self.state.drain_events() {
            self.handle_event(event, shake, audio);
        }

        let dt_ms = dt * 1000.0;
        self.camera.update(dt_ms, &mut self.fx_rng);

        let ended = self.end_timer.as_mut().is_some_and(|t| t.advance(dt_ms));
        ended.then(|| self.summary())
    }
}

/// Which screen is showing
#[derive(Debug, Clone)]
pub enum Scene {
    /// Asset/animation registration; lasts a single step
    Boot,
    /// Title screen waiting for the jump key
    Start,
    World(Box<WorldScene>),
    /// Results of the last run, waiting for the retry key
    GameOver(RunSummary),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Boot => "Boot",
            Scene::Start => "Start",
            Scene::World(_) => "World",
            Scene::GameOver(_) => "GameOver",
        }
    }
}

enum Transition {
    ToStart,
    ToWorld,
    ToGameOver(RunSummary),
}

/// Owns the active scene and everything shared between scenes
pub struct SceneManager {
    scene: Scene,
    tuning: Tuning,
    next_seed: u64,
    jump_key: KeyEdge,
    retry_key: KeyEdge,
    /// Camera shake on hurt (already folded with reduced motion)
    pub screen_shake: bool,
    audio: Vec<AudioCommand>,
    finished_run: Option<RunSummary>,
    runs: u32,
}

impl SceneManager {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            scene: Scene::Boot,
            tuning,
            next_seed: seed,
            jump_key: KeyEdge::default(),
            retry_key: KeyEdge::default(),
            screen_shake: true,
            audio: Vec::new(),
            finished_run: None,
            runs: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn world(&self) -> Option<&WorldScene> {
        match &self.scene {
            Scene::World(world) => Some(world),
            _ => None,
        }
    }

    pub fn world_mut(&mut self) -> Option<&mut WorldScene> {
        match &mut self.scene {
            Scene::World(world) => Some(world),
            _ => None,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of World sessions started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Audio commands queued since the last drain
    pub fn drain_audio(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.audio)
    }

    /// The summary of a run that just ended, handed out once
    pub fn take_finished_run(&mut self) -> Option<RunSummary> {
        self.finished_run.take()
    }

    /// Advance the active scene by one fixed step
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        self.jump_key.update(input.jump);
        self.retry_key.update(input.retry);

        let transition = match &mut self.scene {
            Scene::Boot => {
                for clip in Clip::ALL {
                    let def = clip.def();
                    log::debug!(
                        "Registered {} frames {}..={} @ {} fps",
                        clip.key(),
                        def.first_frame,
                        def.last_frame,
                        def.frame_rate
                    );
                }
                Some(Transition::ToStart)
            }
            Scene::Start => self.jump_key.pressed.then_some(Transition::ToWorld),
            Scene::World(world) => world
                .step(input, dt, self.screen_shake, &mut self.audio)
                .map(Transition::ToGameOver),
            Scene::GameOver(_) => self.retry_key.pressed.then_some(Transition::ToWorld),
        };

        match transition {
            Some(Transition::ToStart) => {
                log::info!("Boot complete");
                self.scene = Scene::Start;
            }
            Some(Transition::ToWorld) => self.start_world(),
            Some(Transition::ToGameOver(summary)) => {
                log::info!(
                    "Game over: {} points, level {}",
                    summary.points,
                    summary.level
                );
                self.audio.push(AudioCommand::StopAll);
                self.audio.push(AudioCommand::Play(SoundEffect::GameOver));
                self.finished_run = Some(summary);
                self.scene = Scene::GameOver(summary);
            }
            None => {}
        }
    }

    fn start_world(&mut self) {
        let seed = self.next_seed;
        // SplitMix64 step so each retry gets a fresh stream
        self.next_seed = self.next_seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        self.runs += 1;
        log::info!("Starting run {} with seed {}", self.runs, seed);
        self.scene = Scene::World(Box::new(WorldScene::new(seed, self.tuning.clone())));
        self.audio.push(AudioCommand::StartMusic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PlayerState, Rock};

    fn quiet_tuning() -> Tuning {
        Tuning {
            rock_interval_ms: 1.0e9,
            coin_interval_ms: 1.0e9,
            ..Default::default()
        }
    }

    fn press_jump() -> FrameInput {
        FrameInput {
            jump: true,
            ..Default::default()
        }
    }

    fn manager_in_world() -> SceneManager {
        let mut manager = SceneManager::new(7, quiet_tuning());
        manager.tick(&FrameInput::default(), SIM_DT);
        manager.tick(&press_jump(), SIM_DT);
        manager.tick(&FrameInput::default(), SIM_DT);
        manager
    }

    /// Put a falling rock right on the player's head
    fn drop_rock_on_player(world: &mut WorldScene) {
        let state = &mut world.state;
        let pos = state.player.body.pos - Vec2::new(0.0, 18.0);
        let id = state.next_entity_id();
        let mut rock = Rock::new(id, pos, 1.0, 100.0);
        rock.body.vel.y = 60.0;
        state.rocks.push(rock);
    }

    #[test]
    fn test_boot_goes_to_start() {
        let mut manager = SceneManager::new(1, quiet_tuning());
        assert_eq!(manager.scene().name(), "Boot");
        manager.tick(&FrameInput::default(), SIM_DT);
        assert_eq!(manager.scene().name(), "Start");
    }

    #[test]
    fn test_start_waits_for_jump_press() {
        let mut manager = SceneManager::new(1, quiet_tuning());
        manager.tick(&FrameInput::default(), SIM_DT);
        for _ in 0..30 {
            manager.tick(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(manager.scene().name(), "Start");

        manager.tick(&press_jump(), SIM_DT);
        assert_eq!(manager.scene().name(), "World");
        assert_eq!(manager.drain_audio(), vec![AudioCommand::StartMusic]);
        assert_eq!(manager.world().map(|w| w.score_text.as_str()), Some("Score: 0"));
    }

    #[test]
    fn test_holding_jump_through_boot_does_not_skip_start() {
        let mut manager = SceneManager::new(1, quiet_tuning());
        // Key already down when Boot runs: the edge is consumed there
        manager.tick(&press_jump(), SIM_DT);
        manager.tick(&press_jump(), SIM_DT);
        assert_eq!(manager.scene().name(), "Start");
    }

    #[test]
    fn test_coin_updates_score_text_and_plays_cue() {
        let mut manager = manager_in_world();
        manager.drain_audio();
        let world = manager.world_mut().unwrap();
        let pos = world.state.player.body.pos;
        let id = world.state.next_entity_id();
        world.state.coins.push(crate::sim::Coin::new(id, pos, 20.0));

        manager.tick(&FrameInput::default(), SIM_DT);

        assert_eq!(manager.world().unwrap().score_text, "Score: 10");
        assert!(
            manager
                .drain_audio()
                .contains(&AudioCommand::Play(SoundEffect::CoinCollected))
        );
    }

    #[test]
    fn test_hurt_shakes_camera_and_plays_smash() {
        let mut manager = manager_in_world();
        manager.drain_audio();
        drop_rock_on_player(manager.world_mut().unwrap());

        manager.tick(&FrameInput::default(), SIM_DT);

        let world = manager.world().unwrap();
        assert_eq!(world.state.player.state, PlayerState::Hurt);
        assert!(world.camera.is_shaking());
        assert!(
            manager
                .drain_audio()
                .contains(&AudioCommand::Play(SoundEffect::RockSmash))
        );

        // 50 ms of shake is over after a handful of steps
        for _ in 0..6 {
            manager.tick(&FrameInput::default(), SIM_DT);
        }
        let camera = &manager.world().unwrap().camera;
        assert!(!camera.is_shaking());
        assert_eq!(camera.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_shake_can_be_disabled() {
        let mut manager = manager_in_world();
        manager.screen_shake = false;
        drop_rock_on_player(manager.world_mut().unwrap());
        manager.tick(&FrameInput::default(), SIM_DT);
        assert!(!manager.world().unwrap().camera.is_shaking());
    }

    #[test]
    fn test_death_fades_then_game_over() {
        let mut manager = manager_in_world();
        let world = manager.world_mut().unwrap();
        world.state.player.health.set(10);
        world.state.player.points = 7;
        drop_rock_on_player(world);

        manager.tick(&FrameInput::default(), SIM_DT);
        let world = manager.world().unwrap();
        assert_eq!(world.state.player.state, PlayerState::Dead);
        assert!(world.is_ending());

        // Halfway through the 3 s delay the fade is well underway
        for _ in 0..90 {
            manager.tick(&FrameInput::default(), SIM_DT);
        }
        let alpha = manager.world().unwrap().camera.fade_alpha();
        assert!(alpha > 0.4 && alpha < 0.7);
        assert!(manager.take_finished_run().is_none());

        for _ in 0..100 {
            manager.tick(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(manager.scene().name(), "GameOver");
        let audio = manager.drain_audio();
        assert!(audio.contains(&AudioCommand::StopAll));

        let summary = manager.take_finished_run().unwrap();
        assert_eq!(summary.points, 7);
        assert_eq!(summary.level, 1);
        assert!(manager.take_finished_run().is_none());
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut manager = manager_in_world();
        let world = manager.world_mut().unwrap();
        world.state.player.health.set(10);
        drop_rock_on_player(world);
        manager.tick(&FrameInput::default(), SIM_DT);

        let x = manager.world().unwrap().state.player.body.pos.x;
        let run = FrameInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            manager.tick(&run, SIM_DT);
        }
        assert_eq!(manager.world().unwrap().state.player.body.pos.x, x);
    }

    #[test]
    fn test_retry_starts_fresh_run_with_new_seed() {
        let mut manager = manager_in_world();
        let first_seed = manager.world().unwrap().state.seed;
        let world = manager.world_mut().unwrap();
        world.state.player.health.set(10);
        drop_rock_on_player(world);
        for _ in 0..200 {
            manager.tick(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(manager.scene().name(), "GameOver");

        // Jump does nothing here; only retry restarts
        manager.tick(&press_jump(), SIM_DT);
        assert_eq!(manager.scene().name(), "GameOver");

        let retry = FrameInput {
            retry: true,
            ..Default::default()
        };
        manager.tick(&retry, SIM_DT);
        let world = manager.world().unwrap();
        assert_ne!(world.state.seed, first_seed);
        assert_eq!(world.state.player.points, 0);
        assert_eq!(world.state.player.health.current(), 100);
        assert_eq!(world.score_text, "Score: 0");
        assert_eq!(manager.runs(), 2);
    }

    #[test]
    fn test_autopilot_drives_world() {
        let mut manager = SceneManager::new(3, Tuning::default());
        manager.tick(&FrameInput::default(), SIM_DT);
        manager.tick(&press_jump(), SIM_DT);
        let bot = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            manager.tick(&bot, SIM_DT);
        }
        let world = manager.world().unwrap();
        assert_eq!(world.state.time_ticks, 600);
    }

    #[test]
    fn test_camera_fade_alpha_progresses() {
        let mut camera = Camera::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(camera.fade_alpha(), 0.0);
        camera.fade_out(1000.0);
        camera.update(500.0, &mut rng);
        assert!((camera.fade_alpha() - 0.5).abs() < 1e-4);
        camera.update(600.0, &mut rng);
        assert_eq!(camera.fade_alpha(), 1.0);
    }
}
