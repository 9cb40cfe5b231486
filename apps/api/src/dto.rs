use docwatch_application::StorageObjectNotice;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "api-types/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Storage object accepted from a push delivery.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "api-types/push-accepted-response.ts"
)]
pub struct PushAcceptedResponse {
    pub message_id: String,
    pub bucket: String,
    pub object: String,
    pub key: String,
}

impl From<StorageObjectNotice> for PushAcceptedResponse {
    fn from(value: StorageObjectNotice) -> Self {
        let (bucket, object, key) = value.identity.into_parts();

        Self {
            message_id: value.message_id,
            bucket,
            object,
            key,
        }
    }
}
