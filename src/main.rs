//! Flappy Arcade entry point
//!
//! The web build runs the game in a canvas. The native build plays a
//! headless autopilot run and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use flappy_arcade::assets::{self, ASSET_DIR, AssetManifest};
    use flappy_arcade::audio::{AudioManager, cue_for};
    use flappy_arcade::clock::FixedStep;
    use flappy_arcade::hud::hud_texts;
    use flappy_arcade::renderer::{Renderer, build_scene};
    use flappy_arcade::sim::{Command, Flow, GameState, TickInput, apply_command, tick};
    use flappy_arcade::{GameConfig, GameError, LaunchOptions};

    /// DOM ids of every HUD node the game may show
    const HUD_IDS: [&str; 3] = ["hud-score", "hud-game-over", "hud-prompt"];

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        audio: Option<AudioManager>,
        clock: FixedStep,
        input: TickInput,
        document: Document,
        quit: bool,
    }

    impl Game {
        /// Apply a key command right away
        fn command(&mut self, command: Command) {
            if apply_command(&mut self.state, command) == Flow::Quit {
                self.quit = true;
            }
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance_to(time);
            for _ in 0..steps {
                tick(&mut self.state, &self.input);
            }
        }

        /// Play cues for everything that happened since the last frame
        fn play_sounds(&mut self) {
            let events = self.state.drain_events();
            let Some(audio) = &self.audio else { return };
            for effect in events.iter().filter_map(cue_for) {
                audio.play(effect);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(renderer) = self.renderer.as_mut() else {
                return;
            };
            let scene = build_scene(&self.state);
            match renderer.render(&scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.resize(renderer.size.0, renderer.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(hud) = self.document.get_element_by_id("hud") else {
                return;
            };
            let texts = hud_texts(&self.state);

            for text in &texts {
                let el = match self.document.get_element_by_id(text.id) {
                    Some(el) => el,
                    None => {
                        let Ok(el) = self.document.create_element("div") else {
                            continue;
                        };
                        el.set_id(text.id);
                        let _ = hud.append_child(&el);
                        el
                    }
                };
                if el.text_content().as_deref() != Some(text.text.as_str()) {
                    el.set_text_content(Some(&text.text));
                }
                let _ = el.set_attribute("style", &text.css_style());
            }

            for id in HUD_IDS {
                if texts.iter().any(|t| t.id == id) {
                    continue;
                }
                if let Some(el) = self.document.get_element_by_id(id) {
                    let _ = el.set_attribute("style", "display:none;");
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let query = window.location().search().unwrap_or_default();
        let options = LaunchOptions::from_query(&query);
        let config = GameConfig::load(options.variant).map_err(js_error)?;
        let seed = options.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        log::info!(
            "Flappy Arcade starting ({} variant, seed {})",
            config.variant.as_str(),
            seed
        );
        document.set_title(&config.title);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_error("no canvas"))?
            .dyn_into()
            .map_err(|_| js_error("not a canvas"))?;

        // Fixed-size play area
        let (width, height) = (config.screen_width, config.screen_height);
        canvas.set_width(width);
        canvas.set_height(height);

        // Any missing asset aborts startup
        let manifest = AssetManifest::default();
        let (images, audio) = if config.variant.uses_assets() {
            let loaded = assets::load_web(ASSET_DIR, &manifest)
                .await
                .map_err(|e| js_error(GameError::from(e)))?;
            let audio = AudioManager::new(&loaded.clips, config.volume).map_err(js_error)?;
            (Some(loaded.images), Some(audio))
        } else {
            (None, None)
        };

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = Renderer::new(surface, &adapter, width, height, images.as_ref())
            .await
            .map_err(js_error)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(config, seed),
            renderer: Some(renderer),
            audio,
            clock: FixedStep::new(),
            input: TickInput::default(),
            document,
            quit: false,
        }));

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Arcade running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // One command per physical press
            if event.repeat() {
                return;
            }
            let mut g = game.borrow_mut();
            if g.quit {
                return;
            }
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    g.command(Command::Flap);
                }
                "Escape" => g.command(Command::Quit),
                "i" | "I" => {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                }
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
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
            if g.quit {
                shut_down(&mut g);
                return;
            }

            g.update(time);
            g.play_sounds();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    /// Stop drawing and release the GPU surface
    fn shut_down(game: &mut Game) {
        game.renderer = None;
        if let Some(canvas) = game.document.get_element_by_id("canvas") {
            let _ = canvas.set_attribute("class", "hidden");
        }
        if let Some(hud) = game.document.get_element_by_id("hud") {
            hud.set_text_content(Some("Thanks for playing"));
        }
        log::info!("Flappy Arcade stopped");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await.inspect_err(|e| {
        log::error!("Startup failed: {:?}", e);
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), flappy_arcade::GameError> {
    use flappy_arcade::assets::{AssetManifest, asset_root, load_native};
    use flappy_arcade::consts::{DEFAULT_HEADLESS_TICKS, DEFAULT_SEED};
    use flappy_arcade::{GameConfig, LaunchOptions, headless};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = LaunchOptions::from_args(std::env::args().skip(1));
    let config = GameConfig::load(options.variant)?;
    log::info!("Flappy Arcade (native, headless) starting: {}", config.title);

    // The sprite variant refuses to start without its assets
    if config.variant.uses_assets() {
        let root = asset_root()?;
        load_native(&root, &AssetManifest::default())?;
    }

    let seed = options.seed.unwrap_or(DEFAULT_SEED);
    let ticks = options.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS);
    let summary = headless::run(config, seed, ticks);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
