//! Storage object sink that only logs. Used when no table is configured.

use async_trait::async_trait;
use docwatch_application::{StorageObjectNotice, StorageObjectSink};
use docwatch_core::AppResult;
use tracing::info;

/// Sink that records storage object notices in tracing output.
#[derive(Clone)]
pub struct TracingStorageObjectSink;

impl TracingStorageObjectSink {
    /// Creates a new tracing sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingStorageObjectSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageObjectSink for TracingStorageObjectSink {
    async fn accept(&self, notice: &StorageObjectNotice) -> AppResult<()> {
        info!(
            message_id = %notice.message_id,
            method_name = %notice.method_name,
            bucket = notice.identity.bucket(),
            object = notice.identity.object_path(),
            key = notice.identity.key(),
            "storage object notice received"
        );

        Ok(())
    }
}
