//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Executor and validation engine produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → Whatever subscriber / recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a call
//! - Metrics are cheap (no-ops until a recorder is installed)

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
