//! Resilient request executor.
//!
//! # Responsibilities
//! - Reject requests without URL or required body before any I/O
//! - Send attempts through a [`Transport`] under the per-attempt deadline
//! - Classify every outcome (success, not found, retryable, fatal)
//! - Retry transient failures with backoff until the call's budget is spent
//! - Abort the in-flight attempt or backoff wait when the caller cancels
//!
//! # Design Decisions
//! - Options are shared read-only; the budget is a local of each call
//! - 404 is terminal regardless of retry configuration
//! - With retries disabled the first outcome is reported as-is (fatal status
//!   or transport error); with retries enabled a still-failing call ends in
//!   `RetryExhausted`

use std::sync::Arc;
use std::time::Instant;

use crate::http::error::{ExecError, LastFailure, TransportError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::observability::metrics;
use crate::resilience::retries::{classify_status, RetryOptions, StatusClass};
use crate::resilience::timeouts::{self, CancelToken};

/// Classified result of one attempt.
#[derive(Debug)]
pub enum RequestOutcome {
    Success(Response),
    NotFound,
    RetryableServerError(u16),
    Fatal(u16),
    Transport(TransportError),
}

impl RequestOutcome {
    pub fn classify(result: Result<Response, TransportError>) -> Self {
        match result {
            Err(e) => Self::Transport(e),
            Ok(resp) => match classify_status(resp.status) {
                StatusClass::Success => Self::Success(resp),
                StatusClass::NotFound => Self::NotFound,
                StatusClass::Retryable => Self::RetryableServerError(resp.status),
                StatusClass::Fatal => Self::Fatal(resp.status),
            },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RetryableServerError(_) | Self::Transport(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound => "not_found",
            Self::RetryableServerError(_) => "server_error",
            Self::Fatal(_) => "fatal",
            Self::Transport(_) => "transport",
        }
    }
}

/// Sends requests with retry, backoff and status classification.
///
/// Cheap to clone; clones share the transport and the options.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T = ReqwestTransport> {
    transport: T,
    options: Arc<RetryOptions>,
}

impl RequestExecutor<ReqwestTransport> {
    /// Executor over a fresh `reqwest` client.
    pub fn new(options: RetryOptions) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(options.timeout)?;
        Ok(Self::with_transport(transport, options))
    }
}

impl<T: Transport> RequestExecutor<T> {
    pub fn with_transport(transport: T, options: RetryOptions) -> Self {
        Self {
            transport,
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute `request` to completion.
    pub async fn execute(&self, request: Request) -> Result<Response, ExecError> {
        self.execute_with_cancel(request, &CancelToken::new()).await
    }

    /// Execute `request`, giving up as soon as `cancel` fires.
    pub async fn execute_with_cancel(
        &self,
        mut request: Request,
        cancel: &CancelToken,
    ) -> Result<Response, ExecError> {
        request.validate()?;

        let request_id = request.ensure_request_id();
        let method = request.method.as_str().to_owned();
        let start = Instant::now();
        let mut budget = self.options.budget();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            metrics::record_attempt(&method);
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                url = %request.url,
                attempt = attempts,
                "Sending request"
            );

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return self.cancelled(&request_id, &method, attempts, start);
                }
                result = self.attempt(&request) => RequestOutcome::classify(result),
            };

            if outcome.is_retryable() {
                if let Some(index) = budget.try_consume() {
                    let delay = self.options.backoff.delay(index);
                    let reason = outcome.label();
                    match &outcome {
                        RequestOutcome::Transport(e) => tracing::warn!(
                            request_id = %request_id,
                            attempt = attempts,
                            remaining = budget.remaining(),
                            delay = ?delay,
                            error = %e,
                            "Retrying after transport error"
                        ),
                        _ => tracing::info!(
                            request_id = %request_id,
                            attempt = attempts,
                            remaining = budget.remaining(),
                            delay = ?delay,
                            outcome = reason,
                            "Retrying request"
                        ),
                    }
                    metrics::record_retry(&method, reason);

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            return self.cancelled(&request_id, &method, attempts, start);
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    continue;
                }
            }

            metrics::record_request(&method, outcome.label(), start);
            return self.finish(outcome, &request, &request_id, attempts);
        }
    }

    async fn attempt(&self, request: &Request) -> Result<Response, TransportError> {
        let limit = self.options.timeout;
        match timeouts::deadline(limit, self.transport.send(request)).await {
            Some(result) => result,
            None => Err(TransportError::Timeout(limit)),
        }
    }

    fn finish(
        &self,
        outcome: RequestOutcome,
        request: &Request,
        request_id: &str,
        attempts: u32,
    ) -> Result<Response, ExecError> {
        let exhausted = self.options.retries_enabled();
        let result = match outcome {
            RequestOutcome::Success(resp) => {
                tracing::debug!(
                    request_id = %request_id,
                    status = resp.status,
                    attempts,
                    "Request succeeded"
                );
                return Ok(resp);
            }
            RequestOutcome::NotFound => ExecError::NotFound {
                url: request.url.clone(),
            },
            RequestOutcome::Fatal(status) => ExecError::FatalStatus { status },
            RequestOutcome::RetryableServerError(status) if exhausted => {
                ExecError::RetryExhausted {
                    attempts,
                    last: LastFailure::Status(status),
                }
            }
            RequestOutcome::RetryableServerError(status) => ExecError::FatalStatus { status },
            RequestOutcome::Transport(e) if exhausted => ExecError::RetryExhausted {
                attempts,
                last: LastFailure::Transport(e.to_string()),
            },
            RequestOutcome::Transport(e) => ExecError::Transport(e),
        };

        if result.is_not_found() {
            tracing::debug!(request_id = %request_id, url = %request.url, "Resource not found");
        } else {
            tracing::error!(
                request_id = %request_id,
                method = %request.method,
                url = %request.url,
                attempts,
                error = %result,
                "Request failed"
            );
        }
        Err(result)
    }

    fn cancelled(
        &self,
        request_id: &str,
        method: &str,
        attempts: u32,
        start: Instant,
    ) -> Result<Response, ExecError> {
        tracing::info!(request_id = %request_id, attempts, "Request cancelled by caller");
        metrics::record_request(method, "cancelled", start);
        Err(ExecError::Cancelled)
    }
}
