//! Network seam of the executor.
//!
//! # Responsibilities
//! - Send one attempt of a [`Request`] and hand back a buffered [`Response`]
//! - Always consume the response body before returning
//!
//! # Design Decisions
//! - Generic trait rather than a trait object so the executor stays `Send`
//!   without boxing every attempt
//! - Status codes are not interpreted here; classification belongs to the executor

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::http::error::TransportError;
use crate::http::request::Request;
use crate::http::response::Response;

/// Sends a single attempt over the network.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request)
        -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).send(request)
    }
}

/// `reqwest`-backed transport used outside of tests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

/// Added to the attempt deadline to get the client's own timeout.
const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Client timeout for a given attempt deadline.
///
/// Always at least [`CLIENT_TIMEOUT_SLACK`], so a hung server cannot block a
/// call forever even when the attempt deadline is disabled.
fn client_timeout(attempt: Duration) -> Duration {
    attempt.saturating_add(CLIENT_TIMEOUT_SLACK)
}

impl ReqwestTransport {
    /// Build a client whose own timeout is a little looser than the executor's
    /// per-attempt deadline, so the executor reports the timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(client_timeout(timeout)).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.as_str())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Connection(e.to_string())
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
