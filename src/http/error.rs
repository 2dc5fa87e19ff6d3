//! Executor and transport error definitions.

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use thiserror::Error;

/// Failure below the HTTP status level: no usable response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The attempt exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection could not be established or was reset.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Error reported by the HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// What the last attempt of an exhausted call looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastFailure {
    Status(u16),
    Transport(String),
}

impl fmt::Display for LastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastFailure::Status(status) => write!(f, "{} status code received", status),
            LastFailure::Transport(cause) => write!(f, "{}", cause),
        }
    }
}

/// Errors returned by [`RequestExecutor`](super::RequestExecutor).
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("request does not have url")]
    EmptyUrl,

    #[error("{method} request does not have body")]
    EmptyBody { method: Method },

    /// Terminal; never retried.
    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("giving up after {attempts} attempts: {last}")]
    RetryExhausted { attempts: u32, last: LastFailure },

    #[error("failed to do request, {status} status code received")]
    FatalStatus { status: u16 },

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("request cancelled")]
    Cancelled,
}

impl ExecError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExecError::NotFound { .. })
    }

    /// Last HTTP status observed, if the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExecError::NotFound { .. } => Some(404),
            ExecError::FatalStatus { status } => Some(*status),
            ExecError::RetryExhausted {
                last: LastFailure::Status(status),
                ..
            } => Some(*status),
            _ => None,
        }
    }
}
