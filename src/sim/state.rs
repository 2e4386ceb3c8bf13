//! Game state and core simulation types
//!
//! One field, two paddles, one ball and a scoreboard, all owned by
//! [`GameState`]. Entities are moved and reset in place, never recreated.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading;
use crate::renderer::{Color, Surface};
use crate::settings::Palette;

/// The rectangular play area. Origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which edge a paddle sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleSide {
    Top,
    Bottom,
}

/// A horizontal bar pinned to the top or bottom edge
#[derive(Debug, Clone)]
pub struct Paddle {
    side: PaddleSide,
    pub(crate) x: f32,
    y: f32,
    width: f32,
    height: f32,
    speed: f32,
    is_ai: bool,
    color: Color,
    /// Right-most legal left edge
    max_x: f32,
}

impl Paddle {
    /// Place a paddle horizontally centered on its edge
    pub fn new(side: PaddleSide, field: &Field, color: Color, is_ai: bool) -> Self {
        let width = field.width * PADDLE_WIDTH_FRACTION;
        let height = field.height * PADDLE_HEIGHT_FRACTION;
        let y = match side {
            PaddleSide::Top => 0.0,
            PaddleSide::Bottom => field.height - height,
        };
        Self {
            side,
            x: field.width / 2.0 - width / 2.0,
            y,
            width,
            height,
            speed: field.width * PADDLE_SPEED_FRACTION,
            is_ai,
            color,
            max_x: (field.width - width).max(0.0),
        }
    }

    pub fn side(&self) -> PaddleSide {
        self.side
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// The edge facing the field interior
    pub fn collision_edge_y(&self) -> f32 {
        match self.side {
            PaddleSide::Top => self.y + self.height,
            PaddleSide::Bottom => self.y,
        }
    }

    /// Whether `x` lies within the paddle's horizontal extent (inclusive)
    pub fn spans(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    pub fn move_left(&mut self, surface: &mut dyn Surface) {
        self.erase(surface);
        self.x = (self.x - self.speed).max(0.0);
        self.draw(surface);
    }

    pub fn move_right(&mut self, surface: &mut dyn Surface) {
        self.erase(surface);
        self.x = (self.x + self.speed).min(self.max_x);
        self.draw(surface);
    }

    /// Chase the ball's horizontal position. No-op for human paddles.
    pub fn react_to_ball(&mut self, ball_x: f32, ball_speed: f32, surface: &mut dyn Surface) {
        if !self.is_ai {
            return;
        }
        self.speed = ball_speed * AI_SPEED_RATIO;
        let center = self.center_x();
        if center > ball_x {
            self.move_left(surface);
        } else if center < ball_x {
            self.move_right(surface);
        }
    }
}

/// The ball. Reset in place on every serve.
#[derive(Debug, Clone)]
pub struct Ball {
    pub(crate) pos: Vec2,
    pub(crate) radius: f32,
    /// Heading in degrees
    pub(crate) angle: f32,
    pub(crate) speed: f32,
    color: Color,
    /// Where the ball was last drawn, for erasing
    drawn: Option<(Vec2, f32)>,
}

impl Ball {
    /// A freshly served ball at field center
    pub fn new(field: &Field, color: Color, rng: &mut Pcg32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            radius: 0.0,
            angle: 0.0,
            speed: 0.0,
            color,
            drawn: None,
        };
        ball.serve(field, rng);
        ball
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Erase the last drawn ball (if any) and serve again from the center
    pub fn reset(&mut self, field: &Field, rng: &mut Pcg32, surface: &mut dyn Surface) {
        self.erase(surface);
        self.serve(field, rng);
    }

    fn serve(&mut self, field: &Field, rng: &mut Pcg32) {
        self.pos = field.center();
        self.radius = field.width / field.height * BALL_RADIUS_SCALE;
        self.speed = field.width * BALL_SPEED_FRACTION;
        self.angle = SERVE_ANGLES[rng.random_range(0..SERVE_ANGLES.len())];
    }

    /// Reflect the heading with `constant - angle`
    pub fn reflect(&mut self, constant: f32) {
        self.angle = constant - self.angle;
    }

    /// Bounce off a side wall if past it, then move one frame
    pub fn advance(&mut self, field: &Field, surface: &mut dyn Surface) {
        if self.pos.x > field.width || self.pos.x < 0.0 {
            self.reflect(WALL_REFLECTION);
        }
        let delta = heading(self.angle, self.speed);
        self.erase(surface);
        self.pos += delta;
        self.draw(surface);
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.drawn = Some((self.pos, self.radius));
    }

    pub(crate) fn take_drawn(&mut self) -> Option<(Vec2, f32)> {
        self.drawn.take()
    }
}

/// Which side a point goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSide {
    /// Bottom (human) player
    First,
    /// Top (AI) player
    Second,
}

/// Point counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub first: u32,
    pub second: u32,
}

/// Two score counters and the colours they are drawn in
#[derive(Debug, Clone)]
pub struct Scoreboard {
    pub(crate) scores: Scores,
    pub(crate) first_color: Color,
    pub(crate) second_color: Color,
    /// Colour used to overdraw the previous score
    pub(crate) background: Color,
}

impl Scoreboard {
    pub fn new(first_color: Color, second_color: Color, background: Color) -> Self {
        Self {
            scores: Scores::default(),
            first_color,
            second_color,
            background,
        }
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn award(&mut self, side: ScoreSide) {
        match side {
            ScoreSide::First => self.scores.first += 1,
            ScoreSide::Second => self.scores.second += 1,
        }
    }
}

/// Game events emitted by a tick, consumed by the controller for audio and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off the paddle on this side
    PaddleHit(PaddleSide),
    /// A point was scored and the ball re-served
    Scored(ScoreSide),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    /// Human paddle, bottom edge
    pub player: Paddle,
    /// AI paddle, top edge
    pub ai: Paddle,
    pub ball: Ball,
    pub scoreboard: Scoreboard,
    /// Serve-angle RNG
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(field: Field, palette: &Palette, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&field, palette.ball.clone(), &mut rng);
        Self {
            field,
            player: Paddle::new(PaddleSide::Bottom, &field, palette.player.clone(), false),
            ai: Paddle::new(PaddleSide::Top, &field, palette.ai.clone(), true),
            ball,
            scoreboard: Scoreboard::new(
                palette.score_first.clone(),
                palette.score_second.clone(),
                palette.background.clone(),
            ),
            rng,
            time_ticks: 0,
        }
    }

    /// Draw every entity once
    pub fn draw_all(&mut self, surface: &mut dyn Surface) {
        self.scoreboard.render(&self.field, surface);
        self.ball.draw(surface);
        self.ai.draw(surface);
        self.player.draw(surface);
    }

    /// Serializable view of the session
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            scores: self.scoreboard.scores,
            ball: self.ball.pos,
            ball_angle: self.ball.angle,
            player_x: self.player.x,
            ai_x: self.ai.x,
            time_ticks: self.time_ticks,
        }
    }
}

/// Point-in-time view of a session, for the JS side and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Field,
    pub scores: Scores,
    pub ball: Vec2,
    pub ball_angle: f32,
    pub player_x: f32,
    pub ai_x: f32,
    pub time_ticks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(800.0, 400.0)
    }

    fn ai_paddle() -> Paddle {
        Paddle::new(PaddleSide::Top, &field(), Color::from("#ff0"), true)
    }

    fn count_moves(surface: &RecordingSurface) -> usize {
        // Every move is one clear followed by one fill
        surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::ClearRect { .. }))
            .count()
    }

    #[test]
    fn test_paddle_placement() {
        let f = field();
        let bottom = Paddle::new(PaddleSide::Bottom, &f, Color::from("#fff"), false);
        assert_eq!(bottom.width(), 120.0);
        assert_eq!(bottom.height(), 8.0);
        assert_eq!(bottom.x(), 400.0 - 60.0);
        assert_eq!(bottom.y(), 392.0);
        assert_eq!(bottom.collision_edge_y(), 392.0);
        assert_eq!(bottom.speed(), 16.0);

        let top = ai_paddle();
        assert_eq!(top.y(), 0.0);
        assert_eq!(top.collision_edge_y(), 8.0);
        assert!(top.is_ai());
    }

    #[test]
    fn test_paddle_move_clamps_and_redraws() {
        let mut surface = RecordingSurface::new();
        let mut paddle = Paddle::new(PaddleSide::Bottom, &field(), Color::from("#fff"), false);
        for _ in 0..100 {
            paddle.move_left(&mut surface);
        }
        assert_eq!(paddle.x(), 0.0);
        for _ in 0..100 {
            paddle.move_right(&mut surface);
        }
        assert_eq!(paddle.x(), 800.0 - 120.0);

        surface.calls.clear();
        paddle.move_left(&mut surface);
        assert!(matches!(surface.calls[0], DrawCall::ClearRect { .. }));
        assert!(matches!(surface.calls.last(), Some(DrawCall::FillRect { .. })));
    }

    #[test]
    fn test_ai_tracking() {
        let mut surface = RecordingSurface::new();

        let mut paddle = ai_paddle();
        let center = paddle.center_x();
        paddle.react_to_ball(center - 50.0, 10.0, &mut surface);
        assert_eq!(count_moves(&surface), 1);
        assert!(paddle.center_x() < center);
        assert!((paddle.speed() - 8.5).abs() < 1e-5);

        surface.calls.clear();
        let mut paddle = ai_paddle();
        paddle.react_to_ball(center + 50.0, 10.0, &mut surface);
        assert_eq!(count_moves(&surface), 1);
        assert!(paddle.center_x() > center);

        surface.calls.clear();
        let mut paddle = ai_paddle();
        paddle.react_to_ball(center, 10.0, &mut surface);
        assert_eq!(count_moves(&surface), 0);
        assert_eq!(paddle.center_x(), center);
    }

    #[test]
    fn test_human_paddle_ignores_ball() {
        let mut surface = RecordingSurface::new();
        let mut paddle = Paddle::new(PaddleSide::Bottom, &field(), Color::from("#fff"), false);
        let x = paddle.x();
        paddle.react_to_ball(0.0, 10.0, &mut surface);
        assert_eq!(paddle.x(), x);
        assert_eq!(paddle.speed(), 16.0);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_ball_serve() {
        let f = field();
        let mut rng = Pcg32::seed_from_u64(7);
        let ball = Ball::new(&f, Color::from("#f00"), &mut rng);
        assert_eq!(ball.pos(), Vec2::new(400.0, 200.0));
        assert_eq!(ball.radius(), 10.0);
        assert!((ball.speed() - 5.6).abs() < 1e-5);
        assert!(SERVE_ANGLES.contains(&ball.angle()));
    }

    #[test]
    fn test_ball_reset_erases_previous_position() {
        let f = field();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut surface = RecordingSurface::new();
        let mut ball = Ball::new(&f, Color::from("#f00"), &mut rng);

        // Never drawn: nothing to erase
        ball.reset(&f, &mut rng, &mut surface);
        assert!(surface.calls.is_empty());

        ball.draw(&mut surface);
        ball.pos = Vec2::new(10.0, 20.0);
        surface.calls.clear();
        ball.reset(&f, &mut rng, &mut surface);
        assert_eq!(surface.calls.len(), 1);
        assert!(matches!(
            surface.calls[0],
            DrawCall::ClearRect { x, y, .. } if x == 400.0 - 11.0 && y == 200.0 - 11.0
        ));
        assert_eq!(ball.pos(), f.center());
    }

    #[test]
    fn test_wall_reflection() {
        let f = field();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        let mut ball = Ball::new(&f, Color::from("#f00"), &mut rng);

        ball.pos = Vec2::new(f.width + 0.5, 100.0);
        ball.angle = 30.0;
        ball.advance(&f, &mut surface);
        assert_eq!(ball.angle(), 150.0);
        assert!(ball.pos().x < f.width + 0.5);

        // Touching the edge exactly is not a crossing
        ball.pos = Vec2::new(0.0, 100.0);
        ball.angle = 200.0;
        ball.advance(&f, &mut surface);
        assert_eq!(ball.angle(), 200.0);

        // Past the left wall
        ball.pos = Vec2::new(-0.5, 100.0);
        ball.angle = 200.0;
        ball.advance(&f, &mut surface);
        assert_eq!(ball.angle(), -20.0);
        assert!(ball.pos().x > -0.5);
    }

    #[test]
    fn test_ball_integration() {
        let f = field();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut surface = RecordingSurface::new();
        let mut ball = Ball::new(&f, Color::from("#f00"), &mut rng);
        ball.angle = 90.0;
        ball.advance(&f, &mut surface);
        assert!((ball.pos().x - 400.0).abs() < 1e-3);
        assert!((ball.pos().y - 205.6).abs() < 1e-3);
    }

    #[test]
    fn test_scoreboard_award() {
        let mut board = Scoreboard::new(Color::from("#fff"), Color::from("#ff0"), Color::black());
        board.award(ScoreSide::First);
        board.award(ScoreSide::Second);
        board.award(ScoreSide::Second);
        assert_eq!(board.scores(), Scores { first: 1, second: 2 });
    }

    #[test]
    fn test_game_state_seeded() {
        let palette = Palette::default();
        let a = GameState::new(field(), &palette, 42);
        let b = GameState::new(field(), &palette, 42);
        assert_eq!(a.ball.angle(), b.ball.angle());
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.scoreboard.scores(), Scores::default());
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_field(moves in proptest::collection::vec(any::<bool>(), 0..200)) {
            let f = field();
            let mut surface = RecordingSurface::new();
            let mut paddle = Paddle::new(PaddleSide::Bottom, &f, Color::from("#fff"), false);
            for right in moves {
                if right {
                    paddle.move_right(&mut surface);
                } else {
                    paddle.move_left(&mut surface);
                }
                prop_assert!(paddle.x() >= 0.0);
                prop_assert!(paddle.x() <= f.width - paddle.width());
            }
        }
    }
}
