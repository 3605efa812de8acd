use std::time::Duration;

/// Accumulator driving automatic drops.
///
/// The host adds elapsed time with [`advance`](Self::advance); once the
/// accumulated time strictly exceeds the interval one drop is due. The engine
/// calls [`reset`](Self::reset) whenever a drop happens, manual or automatic,
/// and when play resumes after a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTimer {
    interval: Duration,
    elapsed: Duration,
}

impl DropTimer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval without touching the accumulated time.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Adds `delta` and returns whether a drop is due.
    ///
    /// At most one drop is reported per call, however large `delta` is.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.elapsed > self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
