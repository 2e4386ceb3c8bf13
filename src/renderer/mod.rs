//! Drawing surface abstraction
//!
//! The simulation draws through [`Surface`], a small subset of the Canvas 2D
//! API. The browser implementation wraps `CanvasRenderingContext2d`; the
//! headless ones are used by the native binary and the tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use headless::{DrawCall, NullSurface, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A CSS colour string such as `#f00`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn black() -> Self {
        Self::from("#000")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(css: &str) -> Self {
        Self(css.to_string())
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Center => "center",
        }
    }
}

/// Font and anchoring for [`Surface::fill_text`]. Text is anchored at its top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub align: TextAlign,
}

/// Drawing primitives the game needs from its host
///
/// Coordinates are field pixels, origin top-left.
pub trait Surface {
    /// Fill colour for subsequent fill calls
    fn set_fill_color(&mut self, color: &Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}
