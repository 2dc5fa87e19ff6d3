//! Client library for the accounts resource.
//!
//! # Architecture Overview
//!
//! ```text
//!     AccountData
//!         │
//!         ▼
//!   ┌──────────────┐  reject   ┌──────────────────┐
//!   │  validation  │──────────▶│ ValidationError  │  (no request sent)
//!   │    engine    │           └──────────────────┘
//!   └──────┬───────┘
//!          │ amended copy
//!          ▼
//!   ┌──────────────┐   ┌───────────────────────────────┐
//!   │ AccountClient│──▶│       RequestExecutor         │
//!   │ create/fetch │   │ deadline → attempt → classify │
//!   │   /delete    │   │   ↺ backoff while budget > 0  │
//!   └──────────────┘   └──────────────┬────────────────┘
//!                                     │
//!                                     ▼
//!                               ┌───────────┐
//!                               │ Transport │ ──▶ accounts API
//!                               └───────────┘
//! ```
//!
//! Cross-cutting: `config` (TOML → options), `resilience` (backoff, retry
//! budget, timeouts, cancellation), `observability` (tracing, metrics).

pub mod account;
pub mod config;
pub mod http;
pub mod observability;
pub mod resilience;

pub use account::{AccountClient, AccountData, AccountError, Attributes, ValidationEngine};
pub use config::ClientConfig;
pub use http::{ExecError, RequestExecutor};
pub use resilience::{BackoffPolicy, CancelToken, RetryOptions};
