//! Game loop controller
//!
//! [`PongGame`] owns the session and its host collaborators and drives one
//! tick per scheduled frame. The loop is an explicit two-state machine:
//! `Stopped` (initial) and `Running`, where `Running` remembers the frame
//! request that will run the next tick.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::normalize_degrees;
use crate::platform::{FrameHandle, FrameScheduler, HitSound, Key};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{Field, GameEvent, GameState, Scores, Snapshot, tick};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running {
        /// Frame request for the next tick, if one is outstanding
        pending: Option<FrameHandle>,
    },
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running { .. })
    }
}

struct Engine<S, H, F> {
    state: GameState,
    surface: S,
    sound: H,
    scheduler: F,
    loop_state: LoopState,
    /// Bumped on every start; frame callbacks from an older run are ignored
    run_id: u64,
}

impl<S: Surface, H: HitSound, F: FrameScheduler> Engine<S, H, F> {
    fn run_tick(&mut self) {
        for event in tick(&mut self.state, &mut self.surface) {
            match event {
                GameEvent::PaddleHit(side) => {
                    log::debug!(
                        "Paddle hit ({:?}), heading {:.0}°",
                        side,
                        normalize_degrees(self.state.ball.angle())
                    );
                    self.sound.play_from_start();
                }
                GameEvent::Scored(side) => {
                    let scores = self.state.scoreboard.scores();
                    log::info!(
                        "Point to {:?}: {} - {}",
                        side,
                        scores.first,
                        scores.second
                    );
                }
            }
        }
    }
}

/// The game: a session plus the loop that drives it
///
/// Cheap to clone; clones share the same game.
pub struct PongGame<S, H, F> {
    engine: Rc<RefCell<Engine<S, H, F>>>,
}

impl<S, H, F> Clone for PongGame<S, H, F> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S, H, F> PongGame<S, H, F>
where
    S: Surface + 'static,
    H: HitSound + 'static,
    F: FrameScheduler + 'static,
{
    /// Create a session on `field` and draw it once. The loop starts stopped.
    pub fn new(
        field: Field,
        settings: &Settings,
        seed: u64,
        surface: S,
        sound: H,
        scheduler: F,
    ) -> Self {
        let mut state = GameState::new(field, &settings.colors, seed);
        let mut surface = surface;
        state.draw_all(&mut surface);
        log::info!(
            "Game created: field {}x{}, seed {}",
            field.width,
            field.height,
            seed
        );
        Self {
            engine: Rc::new(RefCell::new(Engine {
                state,
                surface,
                sound,
                scheduler,
                loop_state: LoopState::Stopped,
                run_id: 0,
            })),
        }
    }

    /// Begin ticking: one tick now, then one per frame until [`stop`](Self::stop)
    ///
    /// Does nothing if already running.
    pub fn start(&self) {
        let run_id = {
            let mut engine = self.engine.borrow_mut();
            if engine.loop_state.is_running() {
                log::debug!("start() ignored, already running");
                return;
            }
            engine.run_id += 1;
            engine.loop_state = LoopState::Running { pending: None };
            log::info!("Game loop started");
            engine.run_id
        };
        Self::frame(&self.engine, run_id);
    }

    /// Stop ticking and cancel the pending frame. No-op when stopped.
    pub fn stop(&self) {
        let mut engine = self.engine.borrow_mut();
        let loop_state = engine.loop_state;
        match loop_state {
            LoopState::Stopped => {
                log::debug!("stop() ignored, not running");
            }
            LoopState::Running { pending } => {
                if let Some(handle) = pending {
                    engine.scheduler.cancel_frame(handle);
                }
                engine.loop_state = LoopState::Stopped;
                log::info!("Game loop stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine.borrow().loop_state.is_running()
    }

    pub fn loop_state(&self) -> LoopState {
        self.engine.borrow().loop_state
    }

    /// Keyboard input: one paddle move per recognised key
    ///
    /// Works whether or not the loop is running.
    pub fn key_down(&self, key: Key) {
        let mut engine = self.engine.borrow_mut();
        let engine = &mut *engine;
        match key {
            Key::Left => engine.state.player.move_left(&mut engine.surface),
            Key::Right => engine.state.player.move_right(&mut engine.surface),
        }
    }

    pub fn scores(&self) -> Scores {
        self.engine.borrow().state.scoreboard.scores()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.borrow().state.snapshot()
    }

    /// Read access to the session
    pub fn state(&self) -> Ref<'_, GameState> {
        Ref::map(self.engine.borrow(), |engine| &engine.state)
    }

    /// One scheduled frame: tick, then ask for the next frame
    fn frame(engine: &Rc<RefCell<Engine<S, H, F>>>, run_id: u64) {
        let mut guard = engine.borrow_mut();
        let this = &mut *guard;
        if !this.loop_state.is_running() || this.run_id != run_id {
            return;
        }

        this.run_tick();

        let weak: Weak<RefCell<Engine<S, H, F>>> = Rc::downgrade(engine);
        let next = this.scheduler.request_frame(Box::new(move || {
            if let Some(engine) = weak.upgrade() {
                Self::frame(&engine, run_id);
            }
        }));
        match next {
            Some(handle) => {
                this.loop_state = LoopState::Running {
                    pending: Some(handle),
                };
            }
            None => {
                log::warn!("Host refused to schedule a frame, stopping");
                this.loop_state = LoopState::Stopped;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CountingHitSound, QueuedScheduler, SilentHitSound};
    use crate::renderer::{DrawCall, NullSurface, RecordingSurface};
    use glam::Vec2;

    type TestGame = PongGame<NullSurface, CountingHitSound, QueuedScheduler>;

    fn new_game() -> (TestGame, QueuedScheduler, CountingHitSound) {
        let scheduler = QueuedScheduler::new();
        let sound = CountingHitSound::new();
        let game = PongGame::new(
            Field::new(600.0, 600.0),
            &Settings::default(),
            7,
            NullSurface,
            sound.clone(),
            scheduler.clone(),
        );
        (game, scheduler, sound)
    }

    #[test]
    fn test_initially_stopped() {
        let (game, scheduler, _) = new_game();
        assert_eq!(game.loop_state(), LoopState::Stopped);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_new_draws_everything_once() {
        let mut surface = RecordingSurface::new();
        let field = Field::new(600.0, 600.0);
        let mut state = GameState::new(field, &Settings::default().colors, 1);
        state.draw_all(&mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::FillCircle { .. })), 1);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::FillRect { .. })), 2);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::FillText { .. })), 2);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let (game, scheduler, _) = new_game();
        game.stop();
        game.stop();
        assert_eq!(game.loop_state(), LoopState::Stopped);
        assert_eq!(scheduler.cancelled(), 0);
    }

    #[test]
    fn test_start_ticks_immediately_and_schedules() {
        let (game, scheduler, _) = new_game();
        game.start();
        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(scheduler.pending(), 1);
        assert!(matches!(
            game.loop_state(),
            LoopState::Running { pending: Some(_) }
        ));

        assert_eq!(scheduler.run_frames(10), 10);
        assert_eq!(game.state().time_ticks, 11);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_double_start_single_chain() {
        let (game, scheduler, _) = new_game();
        game.start();
        game.start();
        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(scheduler.pending(), 1);
        scheduler.run_frames(5);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(game.state().time_ticks, 6);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let (game, scheduler, _) = new_game();
        game.start();
        scheduler.run_frames(3);
        game.stop();
        assert_eq!(game.loop_state(), LoopState::Stopped);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.cancelled(), 1);
        let ticks = game.state().time_ticks;
        assert!(!scheduler.run_next());
        assert_eq!(game.state().time_ticks, ticks);
    }

    #[test]
    fn test_restart_keeps_entity_state() {
        let (game, scheduler, _) = new_game();
        game.start();
        scheduler.run_frames(20);
        game.stop();
        let before = game.snapshot();

        game.start();
        let after = game.snapshot();
        assert_eq!(after.time_ticks, before.time_ticks + 1);
        assert_eq!(after.scores, before.scores);
        // Ball continued from where it was rather than re-serving
        assert!((after.ball - before.ball).length() < 10.0);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_stale_callback_ignored_after_restart() {
        struct LeakyScheduler(QueuedScheduler);
        impl FrameScheduler for LeakyScheduler {
            fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<FrameHandle> {
                self.0.request_frame(callback)
            }
            // Host that fails to cancel
            fn cancel_frame(&mut self, _handle: FrameHandle) {}
        }

        let queue = QueuedScheduler::new();
        let game = PongGame::new(
            Field::new(600.0, 600.0),
            &Settings::default(),
            7,
            NullSurface,
            SilentHitSound,
            LeakyScheduler(queue.clone()),
        );
        game.start();
        game.stop();
        game.start();
        assert_eq!(queue.pending(), 2);
        assert_eq!(game.state().time_ticks, 2);

        // The first run's callback fires but does nothing
        assert!(queue.run_next());
        assert_eq!(game.state().time_ticks, 2);
        assert_eq!(queue.pending(), 1);
        assert!(queue.run_next());
        assert_eq!(game.state().time_ticks, 3);
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_refused_frame_stops_loop() {
        struct RefusingScheduler;
        impl FrameScheduler for RefusingScheduler {
            fn request_frame(&mut self, _callback: Box<dyn FnOnce()>) -> Option<FrameHandle> {
                None
            }
            fn cancel_frame(&mut self, _handle: FrameHandle) {}
        }

        let game = PongGame::new(
            Field::new(600.0, 600.0),
            &Settings::default(),
            7,
            NullSurface,
            SilentHitSound,
            RefusingScheduler,
        );
        game.start();
        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(game.loop_state(), LoopState::Stopped);
    }

    #[test]
    fn test_key_down_moves_player_once() {
        let (game, _, _) = new_game();
        let x = game.state().player.x();
        let speed = game.state().player.speed();
        game.key_down(Key::Left);
        assert_eq!(game.state().player.x(), x - speed);
        game.key_down(Key::Right);
        game.key_down(Key::Right);
        assert_eq!(game.state().player.x(), x + speed);
    }

    #[test]
    fn test_paddle_hit_plays_sound() {
        let (game, scheduler, sound) = new_game();
        {
            let mut engine = game.engine.borrow_mut();
            engine.state.ball.pos = Vec2::new(300.0, 582.0);
            engine.state.ball.angle = 45.0;
        }
        game.start();
        assert_eq!(sound.plays(), 1);
        scheduler.run_next();
        assert_eq!(sound.plays(), 1);
    }

    #[test]
    fn test_dropped_game_ends_chain() {
        let (game, scheduler, _) = new_game();
        game.start();
        drop(game);
        assert!(scheduler.run_next());
        assert_eq!(scheduler.pending(), 0);
    }
}
