//! Deferred timers measured against the app's elapsed milliseconds.

/// A point in time after which some deferred work should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    due_ms: u64,
}

impl Deferred {
    /// Schedule work `delay_ms` after `now_ms`.
    pub fn after(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
        }
    }

    /// Chain another delay off this timer's due time rather than the current
    /// clock, so repeated short delays don't drift when frames run late.
    pub fn then(self, delay_ms: u64) -> Self {
        Self::after(self.due_ms, delay_ms)
    }

    /// Whether the timer has expired.
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.due_ms
    }

    /// Absolute due time.
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}
