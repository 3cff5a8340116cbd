//! Star Striker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use star_striker::audio::AudioManager;
    use star_striker::consts::*;
    use star_striker::pacing::FramePacer;
    use star_striker::renderer::{RenderState, build_scene};
    use star_striker::sim::{GameEvent, GameState, InputState, Screen, tick};
    use star_striker::ui::{ScreenManager, ids};
    use star_striker::{InitError, Settings};

    const CANVAS_ID: &str = "gameCanvas";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: InputState,
        pacer: FramePacer,
        audio: AudioManager,
        ui: ScreenManager,
        settings: Settings,
    }

    impl Game {
        /// Run the simulation steps owed for this frame
        fn update(&mut self, time: f64) {
            let steps = self.pacer.frame(time);
            for _ in 0..steps.ticks {
                tick(&mut self.state, &self.input, steps.dt_ms);
            }
            self.dispatch_events();
        }

        /// Forward simulation events to the DOM and audio
        fn dispatch_events(&mut self) {
            for event in self.state.drain_events() {
                self.ui.apply(&event);
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::MusicStart => self.audio.start_music(),
                    GameEvent::MusicStop => self.audio.stop_music(),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Start (or restart) a session from a button press
        fn new_session(&mut self) {
            // Browsers only allow audio after a user gesture
            self.audio.resume();
            self.state.start_session();
            self.dispatch_events();
        }
    }

    pub async fn run() -> Result<(), InitError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Star Striker starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(InitError::MissingElement(CANVAS_ID))?
            .dyn_into()
            .map_err(|_| InitError::NotACanvas(CANVAS_ID))?;

        // Backing store at device resolution, simulation stays in viewport pixels
        let dpr = window.device_pixel_ratio();
        let width = (VIEWPORT_WIDTH as f64 * dpr) as u32;
        let height = (VIEWPORT_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let ui = ScreenManager::new(&document)?;
        ui.show(Screen::Start);

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            render_state: Some(render_state),
            input: InputState::new(),
            pacer: FramePacer::new(settings.fixed_timestep),
            audio: AudioManager::new(&settings),
            ui,
            settings,
        }));

        setup_keyboard(&window, game.clone());
        setup_focus_loss(&window, game.clone());
        setup_start_buttons(&document, game.clone());

        request_animation_frame(&window, game);

        log::info!("Star Striker running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let bound = game
                    .borrow_mut()
                    .input
                    .handle_dom_key(&event.key(), &event.code(), pressed);
                // Keep arrows and space from scrolling the page
                if bound {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
    }

    /// Keyup never arrives for keys released while the window is unfocused
    fn setup_focus_loss(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().input.release_all();
        });
        window
            .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    fn setup_start_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ids::START_BUTTONS {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().new_session();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
    }

    fn request_animation_frame(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        match web_sys::window() {
            Some(window) => request_animation_frame(&window, game),
            None => log::error!("Window went away, stopping game loop"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Star Striker failed to start: {}", e);
        web_sys::console::error_1(&format!("Star Striker failed to start: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Striker (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    headless::run(42);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session without a window: sweeps the ship while firing
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_striker::consts::SIM_DT_MS;
    use star_striker::sim::{GameEvent, GameState, InputState, Key, tick};

    /// About two minutes of play at 60Hz
    const MAX_TICKS: u32 = 60 * 120;
    /// Ticks spent moving in one direction before turning
    const SWEEP_TICKS: u32 = 90;

    pub fn run(seed: u64) {
        let mut state = GameState::new(seed);
        let mut input = InputState::new();
        state.start_session();
        input.press(Key::Space);

        let mut cues = 0u32;
        for i in 0..MAX_TICKS {
            let leftward = (i / SWEEP_TICKS) % 2 == 0;
            input.set(Key::ArrowLeft, leftward);
            input.set(Key::ArrowRight, !leftward);

            tick(&mut state, &input, SIM_DT_MS);

            for event in state.drain_events() {
                match event {
                    GameEvent::Sound(_) => cues += 1,
                    GameEvent::LevelTitle { level } => log::info!("Reached level {}", level),
                    GameEvent::FinalScore { outcome, score } => {
                        log::info!("{:?} after {} ticks, score {}", outcome, i + 1, score);
                    }
                    _ => {}
                }
            }

            if state.phase.is_terminal() && state.schedule.is_empty() {
                break;
            }
        }

        log::info!(
            "Headless run finished: phase {:?}, level {}, score {}, {} sound cues",
            state.phase,
            state.level,
            state.score,
            cues
        );
        let summary = serde_json::json!({
            "seed": seed,
            "phase": state.phase,
            "level": state.level,
            "score": state.score,
            "ticks": state.ticks,
        });
        println!("{}", summary);
    }
}
