//! Console logger backed by `tracing`.
use super::types::Log;

/// Target used for stage headers so the formatter can render them as `==>`.
pub(super) const STAGE_TARGET: &str = "dotinst::stage";

/// Logger that emits `tracing` events for the console subscriber installed
/// by [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}
