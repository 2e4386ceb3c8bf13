//! Platform abstraction layer
//!
//! Host capabilities the game needs besides drawing:
//! - Frame scheduling (request/cancel next frame)
//! - Hit sound cue
//! - Keyboard input decoding
//! - Display metrics for initial sizing

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{CountingHitSound, QueuedScheduler, SilentHitSound};

use crate::sim::Field;

/// Identifies a pending frame request so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// "Call me on the next frame"
///
/// Implementations must never run `callback` from inside `request_frame`;
/// the controller is borrowed while it schedules.
pub trait FrameScheduler {
    /// Schedule `callback` for the next frame. `None` if the host refused.
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<FrameHandle>;
    /// Cancel a pending request. Unknown or fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The paddle-hit cue
pub trait HitSound {
    /// Play from the start, restarting if already playing
    fn play_from_start(&mut self);
}

/// Directional keys the human paddle responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Decode a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            _ => None,
        }
    }

    /// Decode a legacy `KeyboardEvent.keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            _ => None,
        }
    }
}

/// Space the host display offers, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub available_width: f32,
    pub available_height: f32,
}

impl DisplayMetrics {
    /// Field covering `fraction` of the available display in each direction
    ///
    /// Sizes are floored to whole pixels to match the canvas backing store.
    pub fn field(&self, fraction: f32) -> Field {
        Field::new(
            (self.available_width * fraction).floor().max(1.0),
            (self.available_height * fraction).floor().max(1.0),
        )
    }
}
