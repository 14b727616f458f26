//! Block Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use block_dodger::audio::AudioManager;
    use block_dodger::consts::*;
    use block_dodger::renderer::{RenderState, scene_vertices};
    use block_dodger::scene::{FrameInput, Scene, SceneManager};
    use block_dodger::{HighScores, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        scenes: SceneManager,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: FrameInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            audio.set_muted(settings.muted);

            let mut scenes = SceneManager::new(seed, Tuning::default());
            scenes.screen_shake = settings.effective_screen_shake();

            Self {
                scenes,
                render_state: None,
                audio,
                settings,
                highscores: HighScores::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: FrameInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.scenes.tick(&self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for command in self.scenes.drain_audio() {
                self.audio.handle(command);
            }
            self.audio.update();

            if let Some(run) = self.scenes.take_finished_run()
                && let Some(rank) =
                    self.highscores
                        .add_score(run.points, run.level, js_sys::Date::now())
            {
                log::info!("New high score, rank {}", rank);
                self.highscores.save();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene_vertices(&self.scenes);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let scene = self.scenes.scene();

            if let Some(world) = self.scenes.world() {
                set_text(&document, "#hud-score .hud-value", &world.score_text);
                set_text(
                    &document,
                    "#hud-level .hud-value",
                    &world.state.player.level.to_string(),
                );
            }

            let best = self
                .highscores
                .top_score()
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            set_text(&document, "#best-score", &best);

            set_visible(&document, "hud", matches!(scene, Scene::World(_)));
            set_visible(&document, "start-screen", matches!(scene, Scene::Start));
            set_visible(&document, "game-over", matches!(scene, Scene::GameOver(_)));

            if let Scene::GameOver(summary) = scene {
                set_text(&document, "#final-score", &summary.points.to_string());
                set_text(&document, "#final-level", &summary.level.to_string());
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten()
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Block Dodger starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        // Hide loading indicator
        set_visible(&document, "loading", false);

        setup_keyboard(game.clone())?;
        setup_focus_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Block Dodger running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" | "ArrowDown" => event.prevent_default(),
                    "r" | "R" => g.input.retry = true,
                    "i" | "I" if !event.repeat() => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" if !event.repeat() => g.toggle_mute(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => g.input.jump = false,
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "r" | "R" => g.input.retry = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Tab hidden: drop held keys so nothing stays stuck down
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.input = FrameInput {
                        autopilot: g.input.autopilot,
                        ..Default::default()
                    };
                    g.last_time = 0.0;
                    log::info!("Tab hidden, input released");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Auto-muted (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus back: restore the user's mute choice
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_dodger::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Block Dodger (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path);
                Tuning::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xB10C_D0D6);

    demo::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use block_dodger::consts::SIM_DT;
    use block_dodger::scene::{FrameInput, Scene, SceneManager};
    use block_dodger::{HighScores, Tuning};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run(seed: u64, tuning: Tuning) {
        let mut scenes = SceneManager::new(seed, tuning);
        let bot = FrameInput {
            autopilot: true,
            ..Default::default()
        };

        // Boot, then press jump on the start screen
        scenes.tick(&FrameInput::default(), SIM_DT);
        scenes.tick(
            &FrameInput {
                jump: true,
                ..bot
            },
            SIM_DT,
        );

        let mut ticks = 0;
        let mut cues = 0;
        while !matches!(scenes.scene(), Scene::GameOver(_)) && ticks < MAX_TICKS {
            scenes.tick(&bot, SIM_DT);
            cues += scenes.drain_audio().len();
            ticks += 1;
        }

        if let Some(run) = scenes.take_finished_run() {
            let mut highscores = HighScores::load();
            let rank = highscores.add_score(run.points, run.level, 0.0);
            log::info!(
                "Demo over after {:.1}s: {} points, level {} (rank {:?}, {} audio cues)",
                run.ticks as f32 * SIM_DT,
                run.points,
                run.level,
                rank,
                cues
            );
        } else if let Some(world) = scenes.world() {
            let player = &world.state.player;
            log::info!(
                "Demo survived {:.1}s: {} points, level {}, health {}",
                ticks as f32 * SIM_DT,
                player.points,
                player.level,
                player.health.current()
            );
        }
    }
}
