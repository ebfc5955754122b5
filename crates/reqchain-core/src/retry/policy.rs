use std::time::Duration;

/// Fixed-count retry with an optional flat wait between attempts.
///
/// `attempts` is the total number of sends, not the number of extra tries:
/// zero means the request is never sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts.
    pub attempts: u32,
    /// Pause before each attempt that follows a failure (zero = no pause).
    pub wait: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, wait: Duration) -> Self {
        Self { attempts, wait }
    }

    /// Delay to apply before the next attempt, given whether the previous
    /// attempt failed.
    pub fn delay_after_failure(&self, previous_failed: bool) -> Option<Duration> {
        if previous_failed && !self.wait.is_zero() {
            Some(self.wait)
        } else {
            None
        }
    }
}
