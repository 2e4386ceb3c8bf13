//! Ball/paddle touch detection and goal-line checks
//!
//! Paddles are axis-aligned rectangles on the top and bottom edges, so a
//! touch is a horizontal overlap plus a vertical proximity test against the
//! paddle edge facing the field. Both paddles reflect with the same
//! `360 - angle` rule.

use super::state::{Ball, Field, Paddle, PaddleSide, ScoreSide};
use crate::consts::{PADDLE_REFLECTION, TOUCH_SLOP};

/// Whether the ball is touching a paddle
///
/// The ball center must lie within the paddle's horizontal extent and its
/// vertical distance to the paddle's inner edge, truncated to whole pixels,
/// must be less than `radius + TOUCH_SLOP`.
pub fn is_touching(ball: &Ball, paddle: &Paddle) -> bool {
    if !paddle.spans(ball.pos.x) {
        return false;
    }
    let distance = (paddle.collision_edge_y() - ball.pos.y).trunc().abs();
    distance - ball.radius < TOUCH_SLOP
}

/// Reflect the ball off `paddle` if touching. Returns whether it bounced.
pub fn resolve_touch(ball: &mut Ball, paddle: &Paddle) -> bool {
    if is_touching(ball, paddle) {
        ball.reflect(PADDLE_REFLECTION);
        true
    } else {
        false
    }
}

/// Check the paddles in order and bounce off the first one touched
///
/// Later paddles are not tested once one registers, so the ball never
/// bounces twice in a single tick.
pub fn resolve_paddle_touches<'a>(
    ball: &mut Ball,
    paddles: impl IntoIterator<Item = &'a Paddle>,
) -> Option<PaddleSide> {
    paddles
        .into_iter()
        .find(|paddle| resolve_touch(ball, paddle))
        .map(Paddle::side)
}

/// Which side scores, if the ball has reached a goal line
pub fn scoring_side(ball: &Ball, field: &Field) -> Option<ScoreSide> {
    if ball.pos.y - ball.radius <= 0.0 {
        Some(ScoreSide::First)
    } else if field.height - ball.pos.y <= ball.radius {
        Some(ScoreSide::Second)
    } else {
        None
    }
}
