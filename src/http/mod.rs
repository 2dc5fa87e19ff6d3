//! HTTP request execution subsystem.
//!
//! # Data Flow
//! ```text
//! Resource method (create / fetch / delete)
//!     → request.rs (method, URL, headers, body; request ID)
//!     → executor.rs (validate, attempt, classify, retry with backoff)
//!     → transport.rs (one network round trip, body fully read)
//!     → response.rs (buffered status + headers + body)
//!     → Caller receives Response or ExecError
//! ```

pub mod error;
pub mod executor;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{ExecError, LastFailure, TransportError};
pub use executor::{RequestExecutor, RequestOutcome};
pub use request::{Request, X_REQUEST_ID};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};
pub use reqwest::Method;
