//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for applications embedding the client
//! - Let `RUST_LOG` override the configured level
//!
//! # Design Decisions
//! - The library never installs a subscriber on its own; callers opt in
//! - Initialization is idempotent: a second call keeps the first subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a fmt subscriber filtered at `level` for this crate.
///
/// Returns false if a global subscriber was already set.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("account_client={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Levels accepted by [`init_logging`].
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
