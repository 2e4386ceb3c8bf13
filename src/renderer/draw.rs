//! Entity drawing
//!
//! Every entity erases its previous pixels before drawing itself, so frames
//! are painted incrementally without clearing the whole canvas.

use super::{Surface, TextAlign, TextStyle};
use crate::consts::SCORE_Y_FRACTION;
use crate::sim::{Ball, Field, Paddle, Scoreboard};

/// Score digits: large, centered, anchored at the top
pub const SCORE_STYLE: TextStyle = TextStyle {
    font: "bold 10em times",
    align: TextAlign::Center,
};

impl Paddle {
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_fill_color(self.color());
        surface.fill_rect(self.x(), self.y(), self.width(), self.height());
    }

    /// Clear the paddle's rectangle plus a 1px margin for antialiasing
    pub fn erase(&self, surface: &mut dyn Surface) {
        surface.clear_rect(
            self.x() - 1.0,
            self.y() - 1.0,
            self.width() + 2.0,
            self.height() + 2.0,
        );
    }
}

impl Ball {
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        surface.set_fill_color(self.color());
        surface.fill_circle(self.pos(), self.radius());
        self.mark_drawn();
    }

    /// Clear the bounding square of the last drawn ball, if any
    pub fn erase(&mut self, surface: &mut dyn Surface) {
        if let Some((pos, radius)) = self.take_drawn() {
            surface.clear_rect(
                pos.x - radius - 1.0,
                pos.y - radius - 1.0,
                radius * 2.0 + 2.0,
                radius * 2.0 + 2.0,
            );
        }
    }
}

impl Scoreboard {
    /// Draw both scores, overdrawing the previous values in the background colour
    ///
    /// At zero there is no previous value and nothing is erased.
    pub fn render(&self, field: &Field, surface: &mut dyn Surface) {
        let half = field.width / 2.0;
        let x_first = half - half * 0.5;
        let x_second = half + half * 0.5;
        let y = field.height * SCORE_Y_FRACTION;

        surface.set_fill_color(&self.background);
        for (score, x) in [(self.scores.first, x_first), (self.scores.second, x_second)] {
            if let Some(previous) = score.checked_sub(1) {
                surface.fill_text(&previous.to_string(), x, y, &SCORE_STYLE);
            }
        }

        surface.set_fill_color(&self.first_color);
        surface.fill_text(&self.scores.first.to_string(), x_first, y, &SCORE_STYLE);
        surface.set_fill_color(&self.second_color);
        surface.fill_text(&self.scores.second.to_string(), x_second, y, &SCORE_STYLE);
    }
}
