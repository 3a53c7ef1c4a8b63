use std::time::Duration;

/// Countdown driven by explicit `advance` calls from the frame loop.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    elapsed: Duration,
    duration: Duration,
}

impl PhaseTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Advance by `delta`, returning the part of `delta` past the end.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        let before = self.remaining();
        self.elapsed = self.elapsed.saturating_add(delta);
        delta.saturating_sub(before)
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Whole seconds left, rounded up.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        let remaining = self.remaining();
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
