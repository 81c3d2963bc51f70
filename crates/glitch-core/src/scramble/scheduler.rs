#![forbid(unsafe_code)]

//! The "next animation frame" primitive.
//!
//! Engines never loop on their own. Each advance ends by asking a
//! [`FrameScheduler`] for exactly one more frame, and the host hands the
//! resulting [`FrameRequest`] back to the engine when that frame arrives.
//! Cancelling a request guarantees it is never delivered.
//!
//! [`FrameLoop`] is the host-driven implementation: the embedding
//! environment calls [`FrameLoop::tick`] once per display frame (a terminal
//! redraw tick, a browser animation frame, or a test loop) and dispatches the
//! returned requests.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(u64);

impl FrameRequest {
    /// Raw request id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Source of single-shot frame callbacks.
pub trait FrameScheduler {
    /// Schedule one callback for the next frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request. Unknown or already delivered requests are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

#[derive(Debug, Default)]
struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameRequest>,
    ticks: u64,
}

/// Deterministic frame scheduler driven by the host.
///
/// Cloning yields another handle to the same queue, so one loop can serve
/// every engine on screen.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    queue: Rc<RefCell<FrameQueue>>,
}

impl FrameLoop {
    /// Create an empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: return every request made before this call, in
    /// request order. Requests made while dispatching land on the next tick.
    pub fn tick(&self) -> Vec<FrameRequest> {
        let mut queue = self.queue.borrow_mut();
        queue.ticks += 1;
        std::mem::take(&mut queue.pending)
    }

    /// Number of requests waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Whether no request is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Number of ticks so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.queue.borrow().ticks
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&mut self) -> FrameRequest {
        let mut queue = self.queue.borrow_mut();
        let request = FrameRequest(queue.next_id);
        queue.next_id += 1;
        queue.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queue.borrow_mut().pending.retain(|&r| r != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_loop_is_idle() {
        let frames = FrameLoop::new();
        assert!(frames.is_idle());
        assert!(frames.tick().is_empty());
        assert_eq!(frames.ticks(), 1);
    }

    #[test]
    fn requests_get_unique_ids() {
        let mut frames = FrameLoop::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn tick_drains_in_request_order() {
        let mut frames = FrameLoop::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert_eq!(frames.tick(), vec![a, b]);
        assert!(frames.is_idle());
    }

    #[test]
    fn cancelled_request_is_never_delivered() {
        let mut frames = FrameLoop::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        frames.cancel_frame(a);
        assert_eq!(frames.tick(), vec![b]);
    }

    #[test]
    fn cancel_unknown_is_noop() {
        let mut frames = FrameLoop::new();
        let a = frames.request_frame();
        frames.tick();
        frames.cancel_frame(a);
        frames.cancel_frame(FrameRequest(999));
        assert!(frames.is_idle());
    }

    #[test]
    fn clones_share_the_queue() {
        let frames = FrameLoop::new();
        let mut handle = frames.clone();
        let a = handle.request_frame();
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.tick(), vec![a]);
    }

    #[test]
    fn requests_during_dispatch_wait_for_next_tick() {
        let mut frames = FrameLoop::new();
        frames.request_frame();
        for _ in frames.tick() {
            frames.request_frame();
        }
        assert_eq!(frames.pending(), 1);
    }
}
