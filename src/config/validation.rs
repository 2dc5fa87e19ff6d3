//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base URL must be an absolute http(s) URL
//! - Value ranges for backoff and log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ConfigValidationError>>
//! - Negative timeouts and retry counts are clamped later, not rejected here

use thiserror::Error;
use url::Url;

use crate::config::schema::{BackoffKind, ClientConfig};
use crate::observability::logging::LOG_LEVELS;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("base_url is empty")]
    EmptyBaseUrl,

    #[error("base_url {url:?} is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("retries.backoff.unit_ms must be greater than 0 for {kind:?} backoff")]
    ZeroBackoffUnit { kind: BackoffKind },

    #[error("retries.backoff.max_delay_ms ({max}) is below unit_ms ({unit})")]
    BackoffCapBelowUnit { unit: u64, max: u64 },

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if config.base_url.is_empty() {
        errors.push(ConfigValidationError::EmptyBaseUrl);
    } else if let Err(reason) = check_base_url(&config.base_url) {
        errors.push(ConfigValidationError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        });
    }

    let backoff = &config.retries.backoff;
    if backoff.kind != BackoffKind::None {
        if backoff.unit_ms == 0 {
            errors.push(ConfigValidationError::ZeroBackoffUnit { kind: backoff.kind });
        } else if backoff.kind != BackoffKind::Constant && backoff.max_delay_ms < backoff.unit_ms {
            errors.push(ConfigValidationError::BackoffCapBelowUnit {
                unit: backoff.unit_ms,
                max: backoff.max_delay_ms,
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Accepts absolute http and https URLs that can carry path segments.
pub fn check_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    Ok(url)
}
