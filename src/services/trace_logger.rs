//! Best-effort trace lines in the host-visible log.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::keys;
use crate::domain::ports::{SettingsStore, TraceLog};
use crate::infrastructure::logging::scrub_secrets;

/// Writes a line to the trace log when logging is enabled in settings.
///
/// Never fails: a log that cannot be written is reported through
/// `tracing` and otherwise ignored.
#[derive(Clone)]
pub struct TraceLogger {
    log: Arc<dyn TraceLog>,
    settings: Arc<dyn SettingsStore>,
}

impl TraceLogger {
    pub fn new(log: Arc<dyn TraceLog>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { log, settings }
    }

    pub async fn log(&self, message: &str) {
        let message = scrub_secrets(message);
        debug!(target: "bmsync::trace", "{message}");

        if !self.settings.get_bool(keys::ENABLE_LOGGING).await {
            return;
        }
        if let Err(err) = self.log.append(&message).await {
            warn!(error = %err, "failed to write trace line");
        }
    }
}
