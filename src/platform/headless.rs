//! Host collaborators that need no browser
//!
//! [`QueuedScheduler`] holds frame callbacks until the owner runs them,
//! which drives the native binary and gives tests full control over time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::{FrameHandle, FrameScheduler, HitSound};

#[derive(Default)]
struct Queue {
    next_id: i32,
    pending: VecDeque<(FrameHandle, Box<dyn FnOnce()>)>,
    requested: u64,
    cancelled: u64,
}

/// Frame scheduler whose callbacks run only when [`run_next`](Self::run_next)
/// is called. Clones share the same queue.
#[derive(Clone, Default)]
pub struct QueuedScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the oldest pending callback. Returns false if none was pending.
    pub fn run_next(&self) -> bool {
        // Pop first so the callback can schedule again
        let next = self.queue.borrow_mut().pending.pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Run up to `frames` callbacks, returning how many ran
    pub fn run_frames(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.run_next()).count()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Total frames ever requested
    pub fn requested(&self) -> u64 {
        self.queue.borrow().requested
    }

    /// Total successful cancellations
    pub fn cancelled(&self) -> u64 {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<FrameHandle> {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push_back((handle, callback));
        queue.requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|(h, _)| *h != handle);
        if queue.pending.len() < before {
            queue.cancelled += 1;
        }
    }
}

/// No audio
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentHitSound;

impl HitSound for SilentHitSound {
    fn play_from_start(&mut self) {}
}

/// Counts plays; clones share the counter
#[derive(Debug, Default, Clone)]
pub struct CountingHitSound {
    plays: Rc<Cell<u32>>,
}

impl CountingHitSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> u32 {
        self.plays.get()
    }
}

impl HitSound for CountingHitSound {
    fn play_from_start(&mut self) {
        self.plays.set(self.plays.get() + 1);
    }
}
