//! Human-readable progress reporting at stage boundaries.

use async_trait::async_trait;
use tracing::info;

/// Destination for progress strings emitted at each major stage boundary.
///
/// The Discord layer sends these as direct messages to the operator (with
/// fallbacks); tests collect them. Delivery is best-effort: implementations
/// must not fail the run over an undeliverable status line.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Emit a progress line.
    async fn emit(&self, message: &str);
}

/// A sink that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl ProgressSink for LogSink {
    async fn emit(&self, message: &str) {
        info!(progress = message, "sync progress");
    }
}
