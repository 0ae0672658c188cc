//! Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{FocusEvent, HtmlCanvasElement, KeyboardEvent};

    use invaders::audio::{AudioManager, VolumeControl};
    use invaders::renderer::{RectBatch, RenderState};
    use invaders::{Game, GameError, Settings};

    /// Log frame stats every this many frames
    const STATS_INTERVAL: u64 = 600;

    /// Everything the frame callback touches
    struct App {
        game: Game<AudioManager>,
        batch: RectBatch,
        render_state: RenderState,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.game.stats.record(time);
            self.game.frame(&mut self.batch);

            match self.render_state.render(self.batch.vertices()) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            if self.game.frames() % STATS_INTERVAL == 0 {
                log::debug!(
                    "frame {}: {} fps, {} bodies ({} invaders, {} bullets)",
                    self.game.frames(),
                    self.game.stats.fps(),
                    self.game.world.len(),
                    self.game.world.invader_count(),
                    self.game.world.bullet_count(),
                );
            }
        }
    }

    pub async fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| GameError::Dom(format!("logger: {}", e)))?;

        log::info!("Invaders starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Dom("no document".to_string()))?;

        let settings = Settings::load();
        // Write back so the stored copy always lists every field
        settings.save();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&settings.canvas_id)
            .ok_or_else(|| GameError::Dom(format!("no #{} element", settings.canvas_id)))?
            .dyn_into()
            .map_err(|_| GameError::Dom(format!("#{} is not a canvas", settings.canvas_id)))?;

        // Playfield is the canvas backing size
        let width = canvas.width();
        let height = canvas.height();

        // The loop only starts once the shot sound is playable
        let sound = AudioManager::load(
            &settings.sound_url,
            VolumeControl::from_settings(&settings),
        )
        .await?;

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Graphics(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Graphics(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            DVec2::new(width as f64, height as f64),
            settings,
            sound,
            seed,
        );
        log::info!("Game initialized ({}x{}, seed {})", width, height, seed);

        let app = Rc::new(RefCell::new(App {
            game,
            batch: RectBatch::default(),
            render_state,
        }));

        setup_input_handlers(&window, app.clone())?;

        request_animation_frame(app);

        log::info!("Invaders running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), GameError> {
        let listen_error = |e: JsValue| GameError::Dom(format!("add listener: {:?}", e));

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.key(), event.key_code()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(listen_error)?;
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_up(&event.key(), event.key_code()) {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(listen_error)?;
            closure.forget();
        }

        // Window blur (click outside, tab switch)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                app.borrow_mut().game.focus_lost();
                log::debug!("Window blurred, keys released");
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(listen_error)?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Invaders failed to start: {}", e);
        web_sys::console::error_1(&format!("Invaders failed to start: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use glam::DVec2;
    use invaders::audio::SilentSound;
    use invaders::consts::FRAME_INTERVAL_MS;
    use invaders::renderer::RectBatch;
    use invaders::game::{FRAME_LIMIT_ENV, frame_limit};
    use invaders::{Game, Settings};

    /// Playfield used by the headless driver
    const NATIVE_GAME_SIZE: DVec2 = DVec2::new(310.0, 300.0);

    env_logger::init();
    log::info!("Invaders (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    let settings = Settings::load();
    let frame_var = std::env::var(FRAME_LIMIT_ENV).ok();
    let limit = frame_limit(frame_var.as_deref());
    match (&frame_var, limit) {
        (_, Some(n)) => log::info!("Stopping after {} frames", n),
        (Some(value), None) => log::warn!(
            "Ignoring {}={:?}, running until stopped",
            FRAME_LIMIT_ENV,
            value
        ),
        (None, None) => log::info!("Running until stopped (set {} to cap)", FRAME_LIMIT_ENV),
    }
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut game = Game::new(NATIVE_GAME_SIZE, settings, SilentSound, seed);
    let mut batch = RectBatch::default();
    let interval = Duration::from_millis(FRAME_INTERVAL_MS);

    while !game.finished(limit) {
        let frame_start = Instant::now();
        game.frame(&mut batch);

        if game.frames() % 60 == 0 {
            log::info!(
                "frame {}: {} invaders, {} bullets, player {}",
                game.frames(),
                game.world.invader_count(),
                game.world.bullet_count(),
                if game.world.player().is_some() { "alive" } else { "destroyed" },
            );
        }

        let elapsed = frame_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }

    log::info!(
        "Finished {} frames with {} bodies on screen",
        game.frames(),
        batch.rect_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
