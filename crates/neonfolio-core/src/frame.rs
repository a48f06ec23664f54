//! One-shot frame requests.

use std::collections::BTreeSet;

/// Handle for a single pending frame callback.
///
/// A request fires at most once. Cancelling it guarantees the owner's frame
/// work for that request never runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(u64);

/// Hands out frame requests and tracks which are still live.
///
/// Components hold the request they were given and, once per rendered frame,
/// try to [`fire`](FrameScheduler::fire) it. Work scheduled while handling a
/// frame lands on the next frame because the component only gets one tick
/// per frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: BTreeSet<u64>,
    frame: u64,
}

impl FrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback on the next frame.
    pub fn request(&mut self) -> FrameRequest {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id);
        FrameRequest(id)
    }

    /// Cancel a pending request. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, request: FrameRequest) -> bool {
        self.pending.remove(&request.0)
    }

    /// Consume a request for the current frame.
    ///
    /// Returns `true` if the request was live and the caller should do its
    /// frame work.
    pub fn fire(&mut self, request: FrameRequest) -> bool {
        self.pending.remove(&request.0)
    }

    /// Whether a request is still waiting to fire.
    pub fn is_pending(&self, request: FrameRequest) -> bool {
        self.pending.contains(&request.0)
    }

    /// Number of live requests.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Mark the start of a new display frame and return its index.
    pub fn advance(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once() {
        let mut scheduler = FrameScheduler::new();
        let request = scheduler.request();
        assert!(scheduler.is_pending(request));
        assert!(scheduler.fire(request));
        assert!(!scheduler.fire(request));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn cancelled_request_never_fires() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.request();
        let second = scheduler.request();
        assert_ne!(first, second);
        assert!(scheduler.cancel(first));
        assert!(!scheduler.fire(first));
        assert!(scheduler.fire(second));
        assert!(!scheduler.cancel(second));
    }

    #[test]
    fn advance_counts_frames() {
        let mut scheduler = FrameScheduler::new();
        assert_eq!(scheduler.advance(), 1);
        assert_eq!(scheduler.advance(), 2);
    }
}
