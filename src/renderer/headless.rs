//! Surfaces without a display
//!
//! [`NullSurface`] discards everything (native headless runs);
//! [`RecordingSurface`] keeps every call for inspection.

use glam::Vec2;

use super::{Color, Surface, TextStyle};

/// Discards all drawing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_fill_color(&mut self, _color: &Color) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32) {}
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _style: &TextStyle) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetFillColor(Color),
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    FillCircle { center: Vec2, radius: f32 },
    FillText { text: String, x: f32, y: f32, style: TextStyle },
}

/// Records every call in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn set_fill_color(&mut self, color: &Color) {
        self.calls.push(DrawCall::SetFillColor(color.clone()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::FillRect { x, y, width, height });
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::ClearRect { x, y, width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.calls.push(DrawCall::FillCircle { center, radius });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }
}
