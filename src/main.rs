//! Envelope Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use envelope_flap::platform::{InputAction, PendingRedirect, RawInput, actions_for};
    use envelope_flap::renderer::{CanvasRenderer, Scene};
    use envelope_flap::sim::{
        Command, CommandQueue, GameEvent, GameState, Viewport, autopilot, tick,
    };
    use envelope_flap::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        commands: CommandQueue,
        settings: Settings,
        renderer: CanvasRenderer,
        /// Only drives the decorative pipe digits
        render_rng: Pcg32,
        redirect: Option<PendingRedirect>,
        autopilot: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer, settings: Settings, tuning: Tuning) -> Self {
            let (w, h) = renderer.size();
            Self {
                state: GameState::with_tuning(seed, Viewport::new(w, h), tuning),
                commands: CommandQueue::new(),
                settings,
                renderer,
                render_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
                redirect: None,
                autopilot: false,
            }
        }

        fn handle_input(&mut self, input: RawInput) {
            for action in actions_for(&input, self.state.phase) {
                match action {
                    InputAction::Command(command) => self.commands.push(command),
                    InputAction::ToggleAutopilot => {
                        self.autopilot = !self.autopilot;
                        log::info!("Autopilot: {}", self.autopilot);
                    }
                }
            }
        }

        /// Drain input, step the simulation once, handle its events
        fn update(&mut self, now_ms: f64) {
            if self.autopilot {
                if !self.state.started() {
                    self.commands.push(Command::Start);
                } else if autopilot::should_jump(&self.state) {
                    self.commands.push(Command::Jump);
                }
            }

            self.commands.drain_into(&mut self.state);
            tick(&mut self.state);

            for event in self.state.take_events() {
                match event {
                    GameEvent::GameOver { outcome } => {
                        self.redirect =
                            Some(PendingRedirect::schedule(outcome, now_ms, &self.settings));
                    }
                    GameEvent::Scored { score } => log::debug!("Score: {}", score),
                    GameEvent::Started | GameEvent::Reset => {}
                }
            }

            if let Some(url) = PendingRedirect::poll(&mut self.redirect, now_ms) {
                log::info!("Navigating to {}", url);
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().set_href(&url) {
                        log::error!("Redirect failed: {:?}", e);
                    }
                }
            }
        }

        fn render(&mut self) {
            let scene = Scene::build(&self.state, &self.settings, &mut self.render_rng);
            self.renderer.draw(&scene);
        }

        fn fit_to_window(&mut self) {
            let (w, h) = window_size();
            self.renderer.resize(w as u32, h as u32);
            self.state.resize(Viewport::new(w, h));
        }
    }

    /// Inner size of the browser window in CSS pixels
    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Envelope Flap starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or_else(|| JsValue::from_str("no #game canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let tuning = Tuning::load();

        // Size the canvas first so the envelope starts centered in the window
        let seed = js_sys::Date::now() as u64;
        let renderer = CanvasRenderer::new(canvas)?;
        let (w, h) = window_size();
        renderer.resize(w as u32, h as u32);
        let game = Rc::new(RefCell::new(Game::new(seed, renderer, settings, tuning)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        request_animation_frame(game);

        log::info!("Envelope Flap running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Touch: start, flap, or reset depending on phase
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().handle_input(RawInput::Touch);
            });
            window.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard: space flaps, R resets, I toggles autopilot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().handle_input(RawInput::Key(event.key()));
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_to_window();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
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
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use envelope_flap::sim::{GameState, Viewport, autopilot, tick};

    env_logger::init();
    log::info!("Envelope Flap (native) starting...");
    log::info!("Native mode is a headless autopilot run - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut state = GameState::new(seed, Viewport::new(400.0, 600.0));
    state.start();
    while !state.over() {
        if autopilot::should_jump(&state) {
            state.jump();
        }
        tick(&mut state);
    }

    println!(
        "seed {}: {:?} with score {} after {} ticks",
        seed,
        state.outcome(),
        state.score,
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
