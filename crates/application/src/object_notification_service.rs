use std::io::Read;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docwatch_core::AppResult;
use docwatch_domain::{
    LogEventError, PushEnvelope, ResourceIdentity, decode_push_envelope,
    decode_push_envelope_from_reader,
};

/// Storage object reported by one audit-log push delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObjectNotice {
    /// Push delivery identifier.
    pub message_id: String,
    /// Publication time of the delivery.
    pub publish_time: DateTime<Utc>,
    /// Audited API method, e.g. `storage.objects.create`.
    pub method_name: String,
    /// Bucket, object path and key of the audited object.
    pub identity: ResourceIdentity,
}

impl StorageObjectNotice {
    /// Builds a notice from a decoded envelope.
    pub fn from_envelope(envelope: &PushEnvelope) -> Result<Self, LogEventError> {
        let event = &envelope.message.payload;

        Ok(Self {
            message_id: envelope.message.message_id.clone(),
            publish_time: envelope.message.publish_time,
            method_name: event.proto_payload.method_name.clone(),
            identity: event.object_identity()?,
        })
    }
}

/// Port receiving storage objects extracted from audit-log deliveries.
#[async_trait]
pub trait StorageObjectSink: Send + Sync {
    /// Accepts one storage object notice.
    async fn accept(&self, notice: &StorageObjectNotice) -> AppResult<()>;
}

/// Application service turning push deliveries into storage object notices.
#[derive(Clone)]
pub struct ObjectNotificationService {
    sink: Arc<dyn StorageObjectSink>,
}

impl ObjectNotificationService {
    /// Creates a service that hands notices to the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn StorageObjectSink>) -> Self {
        Self { sink }
    }

    /// Decodes a push request body without handing it off.
    pub fn decode_notice(body: &[u8]) -> Result<StorageObjectNotice, LogEventError> {
        let envelope = decode_push_envelope(body)?;
        StorageObjectNotice::from_envelope(&envelope)
    }

    /// Decodes a push envelope read from a byte stream without handing it off.
    pub fn decode_notice_from_reader<R: Read>(
        reader: R,
    ) -> Result<StorageObjectNotice, LogEventError> {
        let envelope = decode_push_envelope_from_reader(reader)?;
        StorageObjectNotice::from_envelope(&envelope)
    }

    /// Decodes a push request body and hands the notice to the sink.
    pub async fn handle_push(&self, body: &[u8]) -> AppResult<StorageObjectNotice> {
        let notice = Self::decode_notice(body)?;
        self.sink.accept(&notice).await?;
        Ok(notice)
    }

    /// Decodes a push envelope from a byte stream and hands the notice to the sink.
    pub async fn handle_reader<R: Read>(&self, reader: R) -> AppResult<StorageObjectNotice> {
        let notice = Self::decode_notice_from_reader(reader)?;
        self.sink.accept(&notice).await?;
        Ok(notice)
    }
}
