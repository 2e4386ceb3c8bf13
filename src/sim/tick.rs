//! Per-frame simulation step
//!
//! One tick runs, in order: paddle touches (player first), goal check,
//! ball advance, AI reaction, scoreboard render.

use super::collision::{resolve_paddle_touches, scoring_side};
use super::state::{GameEvent, GameState};
use crate::renderer::Surface;

/// Advance the game by one frame, returning what happened
pub fn tick(state: &mut GameState, surface: &mut dyn Surface) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    if let Some(side) = resolve_paddle_touches(&mut state.ball, [&state.player, &state.ai]) {
        events.push(GameEvent::PaddleHit(side));
    }

    // Evaluated even if the ball just bounced
    if let Some(side) = scoring_side(&state.ball, &state.field) {
        state.scoreboard.award(side);
        state.ball.reset(&state.field, &mut state.rng, surface);
        events.push(GameEvent::Scored(side));
    }

    state.ball.advance(&state.field, surface);

    let (ball_x, ball_speed) = (state.ball.pos.x, state.ball.speed);
    state.ai.react_to_ball(ball_x, ball_speed, surface);

    state.scoreboard.render(&state.field, surface);

    events
}
