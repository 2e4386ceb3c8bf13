//! Canvas Pong - a two-paddle arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Simulation (ball motion, paddle/wall collisions, scoring)
//! - `renderer`: Drawing-surface capability and entity drawing
//! - `platform`: Frame scheduling, audio, input and display metrics
//! - `game`: Game loop controller (start/stop state machine)
//! - `settings`: Colours, sizing and audio configuration
//! - `audio`: Browser hit sound (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{LoopState, PongGame};
pub use settings::Settings;
#[cfg(target_arch = "wasm32")]
pub use platform::web::WebPongGame;

/// Game configuration constants
pub mod consts {
    /// Fraction of the available display used for the field
    pub const DISPLAY_FRACTION: f32 = 0.4;

    /// Paddle sizing, as fractions of the field
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.15;
    pub const PADDLE_HEIGHT_FRACTION: f32 = 0.02;
    pub const PADDLE_SPEED_FRACTION: f32 = 0.02;

    /// AI paddle speed relative to the ball speed
    pub const AI_SPEED_RATIO: f32 = 0.85;

    /// Ball radius is `width / height * BALL_RADIUS_SCALE`
    pub const BALL_RADIUS_SCALE: f32 = 5.0;
    /// Ball speed per frame, as a fraction of field width
    pub const BALL_SPEED_FRACTION: f32 = 0.007;

    /// Serve angles in degrees, one picked uniformly at random per serve
    pub const SERVE_ANGLES: [f32; 8] = [45.0, -45.0, 15.0, -15.0, 195.0, -195.0, 250.0, -250.0];

    /// Extra pixels of vertical distance still counted as a paddle touch
    pub const TOUCH_SLOP: f32 = 2.0;

    /// Side walls reflect with `WALL_REFLECTION - angle`
    pub const WALL_REFLECTION: f32 = 180.0;
    /// Paddles reflect with `PADDLE_REFLECTION - angle`
    pub const PADDLE_REFLECTION: f32 = 360.0;

    /// Timer interval when the host has no animation-frame primitive
    pub const FALLBACK_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Vertical offset of the score text, as a fraction of field height
    pub const SCORE_Y_FRACTION: f32 = 0.2;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Per-frame displacement for a heading in degrees and a scalar speed
#[inline]
pub fn heading(angle_deg: f32, speed: f32) -> glam::Vec2 {
    let radians = deg_to_rad(angle_deg);
    glam::Vec2::new(radians.cos() * speed, radians.sin() * speed)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
