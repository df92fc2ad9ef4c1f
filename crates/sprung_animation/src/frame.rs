//! Frame scheduling
//!
//! The host owns the display clock. Animations ask for "run me on the next
//! frame" one request at a time and chain the next request from inside the
//! callback.

use std::cell::{Cell, RefCell};
use std::mem;

/// Callback run once on the next frame with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// A source of display frames
///
/// Implementations run each requested callback exactly once, some time
/// before the next paint, passing a monotonically increasing timestamp in
/// milliseconds. A request cannot be withdrawn once made.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// A frame source advanced explicitly by the host
///
/// Callbacks requested while a frame is being delivered are held for the
/// following [`advance`](Self::advance), so a self-rescheduling animation
/// moves exactly one step per frame.
#[derive(Default)]
pub struct ManualFrameClock {
    pending: RefCell<Vec<FrameCallback>>,
    frames: Cell<u64>,
    last_frame_ms: Cell<Option<f64>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a frame at `now_ms`, returning the number of callbacks run
    pub fn advance(&self, now_ms: f64) -> usize {
        if let Some(last) = self.last_frame_ms.get() {
            if now_ms < last {
                tracing::warn!("frame time went backwards: {} -> {}", last, now_ms);
            }
        }
        self.last_frame_ms.set(Some(now_ms));
        self.frames.set(self.frames.get() + 1);

        // Take the queue first so callbacks can request the next frame.
        let callbacks = mem::take(&mut *self.pending.borrow_mut());
        let count = callbacks.len();
        for callback in callbacks {
            callback(now_ms);
        }

        tracing::trace!("frame {} at {}ms ran {} callbacks", self.frames.get(), now_ms, count);
        count
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Check if anything is waiting for a frame
    pub fn has_pending_frames(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Number of frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    /// Timestamp of the most recent frame
    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms.get()
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_runs_callbacks_with_timestamp() {
        let clock = ManualFrameClock::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        clock.request_frame(Box::new(move |now: f64| seen_clone.borrow_mut().push(now)));
        assert_eq!(clock.pending_frames(), 1);

        assert_eq!(clock.advance(16.0), 1);
        assert_eq!(*seen.borrow(), vec![16.0]);
        assert!(!clock.has_pending_frames());

        // Nothing queued, nothing runs
        assert_eq!(clock.advance(32.0), 0);
        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.last_frame_ms(), Some(32.0));
    }

    #[test]
    fn test_requests_from_callback_wait_for_next_frame() {
        let clock = Rc::new(ManualFrameClock::new());
        let hits = Rc::new(Cell::new(0));

        let clock_clone = clock.clone();
        let hits_clone = hits.clone();
        clock.request_frame(Box::new(move |_: f64| {
            hits_clone.set(hits_clone.get() + 1);
            let hits_inner = hits_clone.clone();
            clock_clone.request_frame(Box::new(move |_: f64| hits_inner.set(hits_inner.get() + 1)));
        }));

        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(clock.pending_frames(), 1);

        assert_eq!(clock.advance(16.0), 1);
        assert_eq!(hits.get(), 2);
        assert_eq!(clock.pending_frames(), 0);
    }
}
