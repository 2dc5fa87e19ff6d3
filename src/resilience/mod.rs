//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request from the executor:
//!     → timeouts.rs (deadline per attempt, caller cancellation)
//!     → retries.rs (classify status, consume per-call budget)
//!     → backoff.rs (wait before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every attempt has a deadline unless the timeout is zero
//! - Retry budget lives on the stack of a single call, never on the executor
//! - Backoff waits are plain task sleeps; other calls keep running

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::{BackoffIndex, BackoffPolicy};
pub use retries::{classify_status, RetryBudget, RetryOptions, StatusClass};
pub use timeouts::CancelToken;
