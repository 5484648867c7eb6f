//! Render scheduling utilities
//!
//! Clock values are injected as milliseconds so the pipeline can be driven
//! by `performance.now()` in the browser and by plain numbers in tests.

/// Quiet period before a pending render fires
pub const DEFAULT_DEBOUNCE_MS: f64 = 300.0;

/// Collapses a burst of triggers into a single firing
#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer {
    wait_ms: f64,
    pending_since: Option<f64>,
}

impl Debouncer {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            pending_since: None,
        }
    }

    /// Arm (or re-arm) the timer; any earlier pending trigger is superseded
    pub fn trigger(&mut self, now: f64) {
        self.pending_since = Some(now);
    }

    /// True exactly once, when the quiet period since the last trigger has elapsed
    pub fn poll(&mut self, now: f64) -> bool {
        match self.pending_since {
            Some(since) if now - since >= self.wait_ms => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

/// Detects when the host layout has stopped moving
///
/// Settled means the container reported the same dimensions on two
/// consecutive frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutSettle {
    last: Option<(f64, f64)>,
    settled: bool,
}

impl LayoutSettle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's container size; returns whether layout is settled
    pub fn observe(&mut self, width: f64, height: f64) -> bool {
        let current = (width, height);
        self.settled = self.last == Some(current);
        self.last = Some(current);
        self.settled
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Forget previous frames (called after the display list is replaced)
    pub fn reset(&mut self) {
        self.last = None;
        self.settled = false;
    }
}
