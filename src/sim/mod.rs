//! Simulation module
//!
//! All gameplay logic lives here:
//! - Paddle and ball movement
//! - Touch detection and reflection
//! - Goal-line scoring and re-serve
//!
//! Drawing goes through the injected [`Surface`](crate::renderer::Surface);
//! nothing here touches the host directly.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{is_touching, resolve_paddle_touches, resolve_touch, scoring_side};
pub use state::{
    Ball, Field, GameEvent, GameState, Paddle, PaddleSide, ScoreSide, Scoreboard, Scores, Snapshot,
};
pub use tick::tick;
