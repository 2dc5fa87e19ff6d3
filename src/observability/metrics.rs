//! Metrics collection.
//!
//! # Metrics
//! - `account_client_attempts_total` (counter): network attempts by method
//! - `account_client_retries_total` (counter): retries by method and reason
//! - `account_client_requests_total` (counter): logical calls by method, outcome
//! - `account_client_request_duration_seconds` (histogram): call latency including retries
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; exporting is left to the application
//! - Labels stay low-cardinality (no URLs or account ids)

use std::time::Instant;

use ::metrics::{counter, histogram};

pub fn record_attempt(method: &str) {
    counter!("account_client_attempts_total", "method" => method.to_owned()).increment(1);
}

pub fn record_retry(method: &str, reason: &'static str) {
    counter!(
        "account_client_retries_total",
        "method" => method.to_owned(),
        "reason" => reason
    )
    .increment(1);
}

pub fn record_request(method: &str, outcome: &'static str, start: Instant) {
    counter!(
        "account_client_requests_total",
        "method" => method.to_owned(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "account_client_request_duration_seconds",
        "method" => method.to_owned()
    )
    .record(start.elapsed().as_secs_f64());
}
