//! Counters describing one stream's window (launches, outcomes, peak).

/// Snapshot of a stream's window activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Size of the window (N).
    pub capacity: usize,
    /// Fetches launched so far.
    pub launched: usize,
    /// Results yielded as success.
    pub succeeded: usize,
    /// Results yielded as failure.
    pub failed: usize,
    /// Fetches currently occupying a slot.
    pub in_flight: usize,
    /// Highest `in_flight` observed.
    pub peak_in_flight: usize,
}

impl WindowStats {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Results yielded so far (success or failure).
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub(super) fn record_launch(&mut self) {
        self.launched += 1;
        self.in_flight += 1;
        self.peak_in_flight = self.peak_in_flight.max(self.in_flight);
    }

    pub(super) fn record_completion(&mut self, ok: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}
