//! Timeout enforcement and cooperative cancellation.
//!
//! # Responsibilities
//! - Wrap a single attempt with its deadline
//! - Let callers abort an in-flight call, including any pending backoff wait
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Cancellation is a watch channel so a token cancelled before anyone
//!   waits on it is still observed

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Run `fut` under `limit`. Returns `None` when the deadline fires first.
///
/// A zero limit means no deadline.
pub async fn deadline<F: Future>(limit: Duration, fut: F) -> Option<F::Output> {
    if limit.is_zero() {
        return Some(fut.await);
    }
    tokio::time::timeout(limit, fut).await.ok()
}

/// Caller-owned cancellation signal.
///
/// Clones share the same signal; cancelling one cancels all.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Trigger the cancellation signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            // Sender dropped: the signal can no longer fire.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
