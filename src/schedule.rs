//! Once-per-frame coalescing for expensive recomputation.
//!
//! Scroll, resize, and content mutation can each fire many times inside one
//! rendering frame. Every trigger marks what is stale; only the first trigger
//! since the last frame asks the host for an animation frame. When the frame
//! runs, all accumulated work is drained at once.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// Work that is waiting for the next animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingWork {
    /// Recompute every line's extent.
    pub line_extents: bool,
    /// Redraw the ruler ticks.
    pub ruler: bool,
}

impl PendingWork {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.line_extents && !self.ruler
    }
}

/// Coalesces recompute requests into one per frame.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: PendingWork,
    frame_requested: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `work` stale. Returns `true` when the host must request a frame.
    pub fn request(&mut self, work: PendingWork) -> bool {
        self.pending.line_extents |= work.line_extents;
        self.pending.ruler |= work.ruler;
        if self.frame_requested || self.pending.is_empty() {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Whether a frame has been requested and not yet run.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.frame_requested
    }

    /// Drain everything accumulated since the last frame.
    pub fn take(&mut self) -> PendingWork {
        self.frame_requested = false;
        std::mem::take(&mut self.pending)
    }
}
