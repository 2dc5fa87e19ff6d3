//! Retry options and status classification.
//!
//! # Responsibilities
//! - Hold the retry configuration of an executor (timeout, budget, backoff)
//! - Clamp out-of-range option values instead of rejecting them
//! - Track the remaining budget of a single call
//! - Decide which response statuses are terminal and which are retryable
//!
//! # Design Decisions
//! - Options are immutable once an executor is built; every call takes its own
//!   [`RetryBudget`] copy, so one executor can serve concurrent callers
//! - Connection errors and 5xx are retryable; 404 and other statuses are not

use std::time::Duration;

use crate::resilience::backoff::{BackoffIndex, BackoffPolicy};

/// Request timeout used when none (or a negative one) is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Retry configuration of a [`RequestExecutor`](crate::http::RequestExecutor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOptions {
    /// Deadline for a single attempt. Zero disables the deadline.
    pub timeout: Duration,

    /// Number of retries allowed after the first attempt.
    pub max_retry_count: u32,

    /// Master switch; when false the first outcome is final.
    pub should_retry: bool,

    /// Wait between attempts.
    pub backoff: BackoffPolicy,

    /// Counter fed to the backoff policy.
    pub backoff_index: BackoffIndex,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retry_count: 0,
            should_retry: false,
            backoff: BackoffPolicy::None,
            backoff_index: BackoffIndex::Elapsed,
        }
    }
}

impl RetryOptions {
    /// Per-attempt timeout in seconds. Negative values fall back to the default.
    pub fn with_time_duration(mut self, secs: i64) -> Self {
        let secs = u64::try_from(secs).unwrap_or(DEFAULT_TIMEOUT_SECS);
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Retry budget per call. Negative values clamp to zero.
    pub fn with_max_retry_count(mut self, count: i64) -> Self {
        self.max_retry_count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        self
    }

    pub fn with_retry_policy(mut self, should_retry: bool) -> Self {
        self.should_retry = should_retry;
        self
    }

    pub fn with_backoff_policy(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_backoff_index(mut self, index: BackoffIndex) -> Self {
        self.backoff_index = index;
        self
    }

    /// True when at least one retry can ever happen.
    pub fn retries_enabled(&self) -> bool {
        self.should_retry && self.max_retry_count > 0
    }

    /// Fresh budget for one logical call.
    pub fn budget(&self) -> RetryBudget {
        let total = if self.should_retry { self.max_retry_count } else { 0 };
        RetryBudget::new(total, self.backoff_index)
    }
}

/// Remaining retries of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    total: u32,
    remaining: u32,
    index: BackoffIndex,
}

impl RetryBudget {
    pub fn new(total: u32, index: BackoffIndex) -> Self {
        Self {
            total,
            remaining: total,
            index,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Retries taken so far.
    pub fn used(&self) -> u32 {
        self.total - self.remaining
    }

    /// Take one retry from the budget.
    ///
    /// Returns the backoff index for the retry, or `None` once the budget is spent.
    pub fn try_consume(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        Some(match self.index {
            BackoffIndex::Elapsed => self.used() - 1,
            BackoffIndex::Remaining => self.remaining,
        })
    }
}

/// How a response status is treated by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    NotFound,
    Retryable,
    Fatal,
}

/// Classify a raw status code. Status 0 stands for "no response received".
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 | 201 | 204 => StatusClass::Success,
        404 => StatusClass::NotFound,
        0 | 500.. => StatusClass::Retryable,
        _ => StatusClass::Fatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RetryOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.max_retry_count, 0);
        assert!(!options.should_retry);
        assert!(!options.retries_enabled());
    }

    #[test]
    fn test_negative_values_are_clamped() {
        let options = RetryOptions::default()
            .with_time_duration(-3)
            .with_max_retry_count(-1);
        assert_eq!(options.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(options.max_retry_count, 0);

        let options = RetryOptions::default()
            .with_time_duration(2)
            .with_max_retry_count(4)
            .with_retry_policy(true);
        assert_eq!(options.timeout, Duration::from_secs(2));
        assert_eq!(options.max_retry_count, 4);
        assert!(options.retries_enabled());
    }

    #[test]
    fn test_disabled_retry_has_empty_budget() {
        let options = RetryOptions::default().with_max_retry_count(5);
        let mut budget = options.budget();
        assert_eq!(budget.remaining(), 0);
        assert_eq!(budget.try_consume(), None);
    }

    #[test]
    fn test_elapsed_index_grows() {
        let mut budget = RetryBudget::new(3, BackoffIndex::Elapsed);
        let indexes: Vec<_> = std::iter::from_fn(|| budget.try_consume()).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(budget.used(), 3);
    }

    #[test]
    fn test_remaining_index_shrinks() {
        let mut budget = RetryBudget::new(3, BackoffIndex::Remaining);
        let indexes: Vec<_> = std::iter::from_fn(|| budget.try_consume()).collect();
        assert_eq!(indexes, vec![2, 1, 0]);
    }

    #[test]
    fn test_backoff_direction_per_index_mode() {
        let policy = BackoffPolicy::exponential(Duration::from_millis(10));

        let mut elapsed = RetryBudget::new(3, BackoffIndex::Elapsed);
        let grow: Vec<_> = std::iter::from_fn(|| elapsed.try_consume())
            .map(|i| policy.delay(i))
            .collect();
        assert!(grow.windows(2).all(|w| w[0] < w[1]));

        let mut remaining = RetryBudget::new(3, BackoffIndex::Remaining);
        let shrink: Vec<_> = std::iter::from_fn(|| remaining.try_consume())
            .map(|i| policy.delay(i))
            .collect();
        assert!(shrink.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), StatusClass::Success);
        assert_eq!(classify_status(201), StatusClass::Success);
        assert_eq!(classify_status(204), StatusClass::Success);
        assert_eq!(classify_status(404), StatusClass::NotFound);
        assert_eq!(classify_status(0), StatusClass::Retryable);
        assert_eq!(classify_status(500), StatusClass::Retryable);
        assert_eq!(classify_status(503), StatusClass::Retryable);
        assert_eq!(classify_status(202), StatusClass::Fatal);
        assert_eq!(classify_status(400), StatusClass::Fatal);
        assert_eq!(classify_status(409), StatusClass::Fatal);
    }
}
