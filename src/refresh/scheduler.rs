/// Page events that invalidate the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSignal {
    /// Scroll of the document or any scrollable ancestor (capture phase).
    Scroll,
    Resize,
}

/// Coalesces scroll/resize bursts into at most one refresh per animation frame.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    ticking: bool,
    coalesced: u64,
    fired: u64,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this signal scheduled a new frame, false when it
    /// folded into the one already pending.
    pub fn notify(&mut self, _signal: RefreshSignal) -> bool {
        if self.ticking {
            self.coalesced += 1;
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn is_scheduled(&self) -> bool {
        self.ticking
    }

    /// Consume the pending frame, if any. The caller runs the refresh when
    /// this returns true.
    pub fn take_frame(&mut self) -> bool {
        if !self.ticking {
            return false;
        }
        self.ticking = false;
        self.fired += 1;
        true
    }

    /// Signals that arrived while a frame was already pending.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}
