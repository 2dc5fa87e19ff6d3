//! Outgoing request description.
//!
//! # Responsibilities
//! - Describe one logical operation (method, URL, headers, body)
//! - Reject requests that can never succeed before any I/O
//! - Carry a request ID for log correlation
//!
//! # Design Decisions
//! - The body is kept as owned bytes so every retry sends a fresh copy
//! - Request ID added as early as possible for tracing

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use uuid::Uuid;

use crate::http::error::ExecError;

/// Header name for request correlation.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A request handed to the executor.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::POST, url).body(body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a JSON body along with its content type.
    pub fn json_body(self, body: Vec<u8>) -> Self {
        self.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
    }

    /// Methods that are meaningless without a payload.
    pub fn requires_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PUT | Method::PATCH)
    }

    /// Check the request can be sent at all.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.url.is_empty() {
            return Err(ExecError::EmptyUrl);
        }
        if self.requires_body() && self.body.as_ref().map_or(true, Vec::is_empty) {
            return Err(ExecError::EmptyBody {
                method: self.method.clone(),
            });
        }
        Ok(())
    }

    /// Return the request ID, generating one if the caller did not set it.
    pub fn ensure_request_id(&mut self) -> String {
        if let Some(id) = self
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
        {
            return id.to_string();
        }

        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            self.headers.insert(X_REQUEST_ID, value);
        }
        id
    }
}
