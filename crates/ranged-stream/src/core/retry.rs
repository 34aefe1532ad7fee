use std::time::Duration;

/// Delay before a retry using exponential backoff.
///
/// The delay formula is `base * 2^retry_count`, where `retry_count` is
/// 0-indexed (0 = first retry).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ranged_stream::core::retry_delay;
///
/// assert_eq!(retry_delay(0, Duration::from_millis(100)), Duration::from_millis(100));
/// assert_eq!(retry_delay(2, Duration::from_millis(100)), Duration::from_millis(400));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

/// Failure accounting for a single `read` call.
///
/// Open failures, mid-read errors and segments that end before yielding a
/// byte all draw from the same budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    limit: u32,
    spent: u32,
}

impl RetryBudget {
    pub fn new(limit: u32) -> Self { Self { limit, spent: 0 } }

    /// Record one failed cycle. Returns `true` while another attempt is allowed.
    pub fn charge(&mut self) -> bool {
        self.spent = self.spent.saturating_add(1);
        self.spent <= self.limit
    }

    /// Failed cycles recorded so far.
    pub fn spent(&self) -> u32 { self.spent }
}
