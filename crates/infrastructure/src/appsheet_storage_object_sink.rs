use async_trait::async_trait;
use docwatch_application::{StorageObjectNotice, StorageObjectSink};
use docwatch_core::{AppResult, NonEmptyString};
use docwatch_domain::{AppSheetAction, AppSheetRequest};
use serde::Serialize;
use tracing::info;

use crate::HttpAppSheetClient;

/// Row written to the AppSheet table for each storage object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageObjectRow {
    /// Extension-less object key.
    pub key: String,
    /// Bucket holding the object.
    pub bucket: String,
    /// Object path inside the bucket.
    pub object: String,
    /// Push delivery that reported the object.
    pub message_id: String,
}

impl From<&StorageObjectNotice> for StorageObjectRow {
    fn from(notice: &StorageObjectNotice) -> Self {
        Self {
            key: notice.identity.key().to_owned(),
            bucket: notice.identity.bucket().to_owned(),
            object: notice.identity.object_path().to_owned(),
            message_id: notice.message_id.clone(),
        }
    }
}

/// Sink that adds one AppSheet row per storage object.
#[derive(Clone)]
pub struct AppSheetStorageObjectSink {
    client: HttpAppSheetClient,
    table: NonEmptyString,
}

impl AppSheetStorageObjectSink {
    /// Creates a sink writing into `table`.
    pub fn new(client: HttpAppSheetClient, table: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client,
            table: NonEmptyString::new(table)?,
        })
    }
}

#[async_trait]
impl StorageObjectSink for AppSheetStorageObjectSink {
    async fn accept(&self, notice: &StorageObjectNotice) -> AppResult<()> {
        let request = AppSheetRequest::new(self.table.as_str(), AppSheetAction::Add)?
            .add_row(StorageObjectRow::from(notice));

        self.client.execute(&request).await?;

        info!(
            message_id = %notice.message_id,
            table = self.table.as_str(),
            key = notice.identity.key(),
            "storage object row added"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use docwatch_application::StorageObjectNotice;
    use docwatch_domain::ResourceIdentity;
    use serde_json::json;

    use super::StorageObjectRow;

    #[test]
    fn row_is_built_from_notice_identity() {
        let notice = StorageObjectNotice {
            message_id: "9001".to_owned(),
            publish_time: Utc
                .timestamp_opt(1_700_000_000, 0)
                .single()
                .unwrap_or_else(|| panic!("test")),
            method_name: "storage.objects.create".to_owned(),
            identity: ResourceIdentity::parse(
                "projects/_/buckets/docs/objects/DocId_1/invoices_Files_/8F50.invoice_file.pdf",
            )
            .unwrap_or_else(|error| panic!("{error}")),
        };

        let row = StorageObjectRow::from(&notice);

        assert_eq!(
            serde_json::to_value(&row).unwrap_or_else(|error| panic!("{error}")),
            json!({
                "Key": "8F50",
                "Bucket": "docs",
                "Object": "DocId_1/invoices_Files_/8F50.invoice_file.pdf",
                "MessageId": "9001"
            })
        );
    }
}
