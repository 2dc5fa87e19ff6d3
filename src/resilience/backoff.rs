//! Backoff policies for the retry loop.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maps a retry index to the wait before the next attempt.
///
/// The index is produced by [`RetryBudget::try_consume`](super::retries::RetryBudget::try_consume)
/// and its meaning depends on the configured [`BackoffIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffPolicy {
    /// Retry immediately.
    #[default]
    None,

    /// Same delay before every retry.
    Constant(Duration),

    /// `unit * 2^(start_exponent + index)`, capped at `max`.
    Exponential {
        unit: Duration,
        start_exponent: u32,
        max: Duration,
    },

    /// `base * 2^index` capped at `max`, plus up to 10% random jitter.
    ExponentialJitter { base: Duration, max: Duration },
}

impl BackoffPolicy {
    /// Powers of two seeded at `2^1`, in multiples of `unit`, capped at one minute.
    pub fn exponential(unit: Duration) -> Self {
        Self::Exponential {
            unit,
            start_exponent: 1,
            max: Duration::from_secs(60),
        }
    }

    /// Calculate the wait before the retry identified by `index`.
    pub fn delay(&self, index: u32) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Constant(delay) => delay,
            Self::Exponential {
                unit,
                start_exponent,
                max,
            } => doubled(unit, start_exponent.saturating_add(index), max),
            Self::ExponentialJitter { base, max } => {
                let capped = doubled(base, index, max);

                // Apply jitter (0 to 10% of the delay)
                let jitter_range = capped.as_millis() as u64 / 10;
                let jitter = if jitter_range > 0 {
                    rand::thread_rng().gen_range(0..jitter_range)
                } else {
                    0
                };

                capped + Duration::from_millis(jitter)
            }
        }
    }
}

/// Which counter feeds [`BackoffPolicy::delay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffIndex {
    /// Retries already performed (0, 1, 2, ...). Delays grow as the call goes on.
    #[default]
    Elapsed,

    /// Retries still available after the current one is taken (n-1, ..., 0).
    /// Delays shrink as the budget drains.
    Remaining,
}

fn doubled(unit: Duration, exponent: u32, max: Duration) -> Duration {
    let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
    unit.checked_mul(factor).map_or(max, |delay| delay.min(max))
}
