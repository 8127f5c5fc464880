use std::cell::Cell;

/// Single-slot guard coalescing scroll-driven renders into one per display refresh.
///
/// Every request overwrites the latest progress; only the first request after a
/// [`RenderScheduler::take`] asks the host for a refresh callback. Intermediate values are
/// dropped, never queued. Shared through `Rc` between the tracker observer and the session.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    pending: Cell<bool>,
    latest: Cell<f64>,
    coalesced: Cell<u64>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `progress`; returns true if the host must schedule a refresh callback.
    pub fn request(&self, progress: f64) -> bool {
        self.latest.set(progress);
        if self.pending.get() {
            self.coalesced.set(self.coalesced.get() + 1);
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Consume the pending slot on the refresh callback.
    pub fn take(&self) -> Option<f64> {
        if !self.pending.replace(false) {
            return None;
        }
        Some(self.latest.get())
    }

    /// Drop a pending render without drawing.
    pub fn cancel(&self) {
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn latest(&self) -> f64 {
        self.latest.get()
    }

    /// Requests absorbed by an already pending slot.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/schedule.rs"]
mod tests;
