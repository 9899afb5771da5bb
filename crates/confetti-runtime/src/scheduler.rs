//! Hand-stepped frame scheduler

use confetti_core::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::RefCell;

#[derive(Default)]
struct Queue {
    next_id: u64,
    pending: Vec<(FrameHandle, FrameCallback)>,
}

/// A [`FrameScheduler`] whose frames are run explicitly with [`run_frame`].
///
/// Callbacks requested while a frame runs are deferred to the next frame,
/// matching `requestAnimationFrame` semantics.
///
/// [`run_frame`]: ManualScheduler::run_frame
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Queue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Run every callback pending at this moment with `timestamp_ms`.
    /// Returns how many ran.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let due = std::mem::take(&mut self.queue.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp_ms);
        }
        count
    }

    /// Run frames at a fixed interval until nothing is pending or `max_frames` ran.
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, start_ms: f64, interval_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending() > 0 && frames < max_frames {
            self.run_frame(start_ms + interval_ms * frames as f64);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|(h, _)| *h != handle);
        queue.pending.len() != before
    }
}
