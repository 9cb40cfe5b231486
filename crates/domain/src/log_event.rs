use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LogEventError;
use crate::resource_identity::ResourceIdentity;

/// Audit log entry carried inside a push message payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingEvent {
    /// Unique entry identifier assigned by the logging backend.
    pub insert_id: String,
    /// Fully qualified log name.
    pub log_name: String,
    /// Audited action record.
    pub proto_payload: ProtoPayload,
    /// Time the entry was received by the logging backend.
    pub receive_timestamp: DateTime<Utc>,
    /// Monitored resource that produced the entry.
    pub resource: MonitoredResource,
    /// Free-text severity label.
    pub severity: String,
    /// Time the audited action happened.
    pub timestamp: DateTime<Utc>,
}

impl LoggingEvent {
    /// Returns the fully qualified name of the audited resource.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        self.proto_payload.resource_name.as_str()
    }

    /// Splits the audited resource name into bucket, object path and key.
    pub fn object_identity(&self) -> Result<ResourceIdentity, LogEventError> {
        ResourceIdentity::parse(self.resource_name())
    }
}

/// Audited action record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoPayload {
    /// Payload type URL.
    #[serde(rename = "@type", default)]
    pub type_url: String,
    /// Caller authentication details.
    pub authentication_info: AuthenticationInfo,
    /// Authorization checks evaluated for the call.
    pub authorization_info: Vec<AuthorizationInfo>,
    /// Called API method, e.g. `storage.objects.create`.
    pub method_name: String,
    /// Caller network metadata.
    pub request_metadata: RequestMetadata,
    /// Locations of the audited resource.
    #[serde(default)]
    pub resource_location: ResourceLocation,
    /// Slash-delimited name of the audited resource.
    pub resource_name: String,
    /// Service that handled the call.
    pub service_name: String,
    /// Call outcome, kept as received.
    pub status: Map<String, Value>,
}

/// Caller authentication details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationInfo {
    /// Authenticated principal.
    #[serde(default)]
    pub principal_email: String,
    /// Service account key used by the caller, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_key_name: Option<String>,
}

/// One evaluated authorization check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationInfo {
    /// Whether the permission was granted.
    #[serde(default)]
    pub granted: bool,
    /// Checked permission name.
    #[serde(default)]
    pub permission: String,
    /// Resource the permission was checked against.
    #[serde(default)]
    pub resource: String,
    /// Resource attributes, kept as received.
    #[serde(default)]
    pub resource_attributes: Map<String, Value>,
}

/// Caller network metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    /// Caller IP address.
    #[serde(default)]
    pub caller_ip: String,
    /// User agent supplied by the caller.
    #[serde(default)]
    pub caller_supplied_user_agent: String,
    /// Destination attributes, kept as received.
    #[serde(default)]
    pub destination_attributes: Map<String, Value>,
    /// Request attributes.
    #[serde(default)]
    pub request_attributes: RequestAttributes,
}

/// Request attributes recorded for the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAttributes {
    /// Request auth context, kept as received.
    #[serde(default)]
    pub auth: Map<String, Value>,
    /// Time the request was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Locations of the audited resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLocation {
    /// Current storage locations.
    #[serde(default)]
    pub current_locations: Vec<String>,
}

/// Monitored resource descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredResource {
    /// Resource labels.
    pub labels: ResourceLabels,
    /// Resource type, e.g. `gcs_bucket`.
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Labels attached to a bucket resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLabels {
    /// Bucket name.
    #[serde(default)]
    pub bucket_name: String,
    /// Bucket location.
    #[serde(default)]
    pub location: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: String,
}
