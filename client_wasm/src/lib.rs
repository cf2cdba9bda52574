//! WebGPU client for the lane runner
//!
//! Runs the `game_core` session in the browser: keyboard in, HUD and a
//! wgpu-rendered road out. The page drives [`frame`] from
//! `requestAnimationFrame`.
//!
//! Only the WebGPU, DOM and storage glue is wasm32-only; the rest is plain
//! Rust so it can be tested natively.

pub mod camera;
pub mod controls;
pub mod fsm;
pub mod input;
pub mod mesh;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod hud;
#[cfg(target_arch = "wasm32")]
mod renderer;
#[cfg(target_arch = "wasm32")]
mod storage;

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use game_core::systems::{load_best, persist_best};
    use game_core::{Config, HighScoreStore, MemoryStore, Params, Session};
    use tracing::{info, warn};
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use crate::controls::Controls;
    use crate::hud::Hud;
    use crate::renderer::Renderer;
    use crate::storage::LocalStorageStore;

    struct App {
        session: Session,
        controls: Controls,
        hud: Hud,
        renderer: Renderer,
        store: Box<dyn HighScoreStore>,
        last_frame_ms: Option<f64>,
    }

    impl App {
        fn frame(&mut self, now_ms: f64) {
            let dt = match self.last_frame_ms {
                Some(last) => {
                    ((now_ms - last) / 1000.0).clamp(0.0, Params::MAX_DT as f64) as f32
                }
                None => 0.0,
            };
            self.last_frame_ms = Some(now_ms);

            if let Some(input) = self.controls.take_driver_input() {
                self.session.input = input;
                self.session.step(dt);

                if self.session.is_game_over() {
                    self.controls.crash();
                    self.save_best();
                }
            }

            self.hud.update(&self.session.score, self.controls.fsm.state());
            if let Err(e) = self.renderer.draw(&self.session) {
                warn!("render failed: {e}");
            }
        }

        fn save_best(&mut self) {
            match persist_best(&mut self.session.score, self.store.as_mut()) {
                Ok(true) => info!(best = self.session.score.best, "saved high score"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "failed to save high score"),
            }
        }

        fn key_down(&mut self, key: &str) {
            if self.controls.key_down(key) {
                self.restart_session();
            }
        }

        fn restart(&mut self) {
            if self.controls.restart() {
                self.restart_session();
            }
        }

        fn restart_session(&mut self) {
            self.session.restart();
            self.hud.update(&self.session.score, self.controls.fsm.state());
        }
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
        APP.with(|app| app.borrow_mut().as_mut().map(f))
    }

    fn random_seed() -> u64 {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                warn!("getrandom failed, seeding from the clock: {e}");
                js_sys::Date::now() as u64
            }
        }
    }

    fn open_store() -> Box<dyn HighScoreStore> {
        match LocalStorageStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(error = %e, "high score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        info!("Starting lane runner");
    }

    /// Set up the renderer and a fresh session. `config_json` overrides
    /// tuning values; unknown keys are ignored.
    #[wasm_bindgen]
    pub fn init_game(canvas: HtmlCanvasElement, config_json: Option<String>) -> js_sys::Promise {
        wasm_bindgen_futures::future_to_promise(async move {
            let config = match config_json.as_deref() {
                Some(json) => Config::from_json(json)
                    .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?,
                None => Config::new(),
            };

            let store = open_store();
            let best = load_best(store.as_ref());
            let session = Session::new(config, random_seed())
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
                .with_best(best);

            let renderer = Renderer::new(canvas)
                .await
                .map_err(|e| JsValue::from_str(&e))?;

            let mut hud = Hud::new();
            let controls = Controls::new();
            hud.update(&session.score, controls.fsm.state());

            info!(best, "game ready");
            APP.with(|app| {
                *app.borrow_mut() = Some(App {
                    session,
                    controls,
                    hud,
                    renderer,
                    store,
                    last_frame_ms: None,
                })
            });
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Advance and draw one frame. `now_ms` is the rAF timestamp.
    #[wasm_bindgen]
    pub fn frame(now_ms: f64) {
        with_app(|app| app.frame(now_ms));
    }

    #[wasm_bindgen]
    pub fn key_down(key: &str) {
        with_app(|app| app.key_down(key));
    }

    #[wasm_bindgen]
    pub fn key_up(key: &str) {
        with_app(|app| app.controls.key_up(key));
    }

    /// Pause when the page loses focus
    #[wasm_bindgen]
    pub fn pause() {
        with_app(|app| app.controls.pause());
    }

    #[wasm_bindgen]
    pub fn restart() {
        with_app(App::restart);
    }

    #[wasm_bindgen]
    pub fn resize(width: u32, height: u32) {
        with_app(|app| app.renderer.resize(width, height));
    }

    #[wasm_bindgen]
    pub fn score() -> f32 {
        with_app(|app| app.session.score.current).unwrap_or(0.0)
    }

    #[wasm_bindgen]
    pub fn high_score() -> f32 {
        with_app(|app| app.session.score.best).unwrap_or(0.0)
    }

    #[wasm_bindgen]
    pub fn state() -> String {
        with_app(|app| app.controls.fsm.state_string()).unwrap_or_else(|| "Loading".to_string())
    }
}
