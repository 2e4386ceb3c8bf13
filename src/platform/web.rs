//! Browser host: animation frames, display metrics, keyboard and the JS API

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

use super::{DisplayMetrics, FrameHandle, FrameScheduler, Key};
use crate::audio::WebHitSound;
use crate::consts::FALLBACK_FRAME_MS;
use crate::game::PongGame;
use crate::renderer::CanvasSurface;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameSource {
    AnimationFrame,
    /// No `requestAnimationFrame`: fixed-interval timer
    Timeout,
}

/// `requestAnimationFrame`, or `setTimeout` at ~60 Hz where unavailable
pub struct AnimationFrameScheduler {
    window: Window,
    source: FrameSource,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        let has_raf =
            js_sys::Reflect::has(&window, &JsValue::from_str("requestAnimationFrame"))
                .unwrap_or(false);
        let source = if has_raf {
            FrameSource::AnimationFrame
        } else {
            log::warn!("requestAnimationFrame unavailable, using {FALLBACK_FRAME_MS:.2}ms timer");
            FrameSource::Timeout
        };
        Self { window, source }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<FrameHandle> {
        // Frees itself after running; a cancelled one is leaked
        let closure = Closure::once_into_js(move |_: JsValue| callback());
        let id = match self.source {
            FrameSource::AnimationFrame => {
                self.window.request_animation_frame(closure.unchecked_ref())
            }
            FrameSource::Timeout => self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.unchecked_ref(),
                    FALLBACK_FRAME_MS as i32,
                ),
        };
        match id {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("Failed to schedule frame: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        match self.source {
            FrameSource::AnimationFrame => {
                let _ = self.window.cancel_animation_frame(handle.0);
            }
            FrameSource::Timeout => self.window.clear_timeout_with_handle(handle.0),
        }
    }
}

/// Available screen area
pub fn display_metrics(window: &Window) -> Result<DisplayMetrics, JsValue> {
    let screen = window.screen()?;
    Ok(DisplayMetrics {
        available_width: screen.avail_width()? as f32,
        available_height: screen.avail_height()? as f32,
    })
}

type BrowserGame = PongGame<CanvasSurface, WebHitSound, AnimationFrameScheduler>;

/// JS handle: `new WebPongGame("canvas")`, then `start()` / `stop()`
#[wasm_bindgen]
pub struct WebPongGame {
    game: BrowserGame,
    window: Window,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

#[wasm_bindgen]
impl WebPongGame {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebPongGame, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let surface = CanvasSurface::from_element_id(canvas_id)?;
        let settings = Settings::load(surface.canvas());

        let field = display_metrics(&window)?.field(settings.display_fraction);
        surface.resize(&field);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = PongGame::new(
            field,
            &settings,
            seed,
            surface,
            WebHitSound::new(&settings),
            AnimationFrameScheduler::new(window.clone()),
        );

        let keydown = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_key_name(&event.key())
                    .or_else(|| Key::from_key_code(event.key_code()));
                if let Some(key) = key {
                    game.key_down(key);
                }
            })
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        Ok(WebPongGame {
            game,
            window,
            keydown,
        })
    }

    /// Begin or resume the loop
    pub fn start(&self) {
        self.game.start();
    }

    /// Halt the loop
    pub fn stop(&self) {
        self.game.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.game.is_running()
    }

    /// Current session state as JSON
    pub fn snapshot(&self) -> String {
        match serde_json::to_string(&self.game.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize snapshot: {e}");
                String::new()
            }
        }
    }
}

impl Drop for WebPongGame {
    fn drop(&mut self) {
        self.game.stop();
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already initialised"));
    }
    log::info!("Canvas Pong loaded");
}
