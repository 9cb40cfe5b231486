//! Domain types for audit-log push delivery and AppSheet table actions.

#![forbid(unsafe_code)]

mod appsheet;
mod error;
mod log_event;
mod push_envelope;
mod resource_identity;

pub use appsheet::{AppSheetAction, AppSheetProperties, AppSheetRequest, DEFAULT_APPSHEET_LOCALE};
pub use error::{LogEventError, ResourceNameDefect};
pub use log_event::{
    AuthenticationInfo, AuthorizationInfo, LoggingEvent, MonitoredResource, ProtoPayload,
    RequestAttributes, RequestMetadata, ResourceLabels, ResourceLocation,
};
pub use push_envelope::{
    EncodedPayload, PubSubMessage, PushEnvelope, RawPubSubMessage, RawPushEnvelope,
    decode_push_envelope, decode_push_envelope_from_reader,
};
pub use resource_identity::{MIN_RESOURCE_NAME_SEGMENTS, ResourceIdentity};
