//! Canvas Pong entry point
//!
//! The browser build is driven from JavaScript through `WebPongGame`. The
//! native binary runs the simulation headless for a fixed number of frames
//! and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_pong::PongGame;
    use canvas_pong::platform::{DisplayMetrics, QueuedScheduler, SilentHitSound};
    use canvas_pong::renderer::NullSurface;
    use canvas_pong::settings::Settings;

    env_logger::init();
    log::info!("Canvas Pong (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(3600);
    let settings = match std::env::var("CANVAS_PONG_SETTINGS") {
        Ok(json) => Settings::from_json(&json),
        Err(_) => Settings::default(),
    };
    let seed = settings.seed.unwrap_or(1);

    // A 1920x1080 display, as a browser would report it
    let metrics = DisplayMetrics {
        available_width: 1920.0,
        available_height: 1080.0,
    };
    let field = metrics.field(settings.display_fraction);

    let scheduler = QueuedScheduler::new();
    let game = PongGame::new(
        field,
        &settings,
        seed,
        NullSurface,
        SilentHitSound,
        scheduler.clone(),
    );

    game.start();
    let ran = 1 + scheduler.run_frames(frames.saturating_sub(1));
    game.stop();

    let scores = game.scores();
    log::info!("Ran {} frames: {} - {}", ran, scores.first, scores.second);
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_start` in the library, this is just to satisfy the compiler
}
