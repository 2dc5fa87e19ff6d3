//! Configuration schema definitions.
//!
//! This module defines the configuration structure of the client.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::backoff::{BackoffIndex, BackoffPolicy};
use crate::resilience::retries::RetryOptions;

/// Root configuration for the account client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the accounts resource
    /// (e.g. "http://localhost:8080/v1/organisation/accounts").
    pub base_url: String,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ClientConfig {
    /// Executor options described by this configuration.
    pub fn retry_options(&self) -> RetryOptions {
        RetryOptions::default()
            .with_time_duration(self.timeouts.request_secs)
            .with_max_retry_count(self.retries.max_retry_count)
            .with_retry_policy(self.retries.enabled)
            .with_backoff_policy(self.retries.backoff.policy())
            .with_backoff_index(self.retries.index)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-attempt timeout in seconds. Negative values fall back to 10.
    pub request_secs: i64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Retries after the first attempt. Negative values clamp to 0.
    pub max_retry_count: i64,

    /// Delay between attempts.
    pub backoff: BackoffConfig,

    /// Counter used to index the backoff curve.
    pub index: BackoffIndex,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackoffKind {
    #[default]
    None,
    Constant,
    Exponential,
    Jitter,
}

/// Backoff curve settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    pub kind: BackoffKind,

    /// Base delay in milliseconds.
    pub unit_ms: u64,

    /// First exponent of the exponential curve.
    pub start_exponent: u32,

    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            kind: BackoffKind::None,
            unit_ms: 100,
            start_exponent: 1,
            max_delay_ms: 30_000,
        }
    }
}

impl BackoffConfig {
    pub fn policy(&self) -> BackoffPolicy {
        let unit = Duration::from_millis(self.unit_ms);
        let max = Duration::from_millis(self.max_delay_ms);
        match self.kind {
            BackoffKind::None => BackoffPolicy::None,
            BackoffKind::Constant => BackoffPolicy::Constant(unit),
            BackoffKind::Exponential => BackoffPolicy::Exponential {
                unit,
                start_exponent: self.start_exponent,
                max,
            },
            BackoffKind::Jitter => BackoffPolicy::ExponentialJitter { base: unit, max },
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
