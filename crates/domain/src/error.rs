use docwatch_core::AppError;
use thiserror::Error;

use crate::resource_identity::MIN_RESOURCE_NAME_SEGMENTS;

/// Failures while turning a push delivery into a storage object identity.
///
/// Every variant is terminal for the message that produced it. The source
/// error stays attached so callers can tell encoding problems from schema
/// problems.
#[derive(Debug, Error)]
pub enum LogEventError {
    /// Outer envelope is not JSON or lacks required envelope fields.
    #[error("malformed push envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// Nested payload is not valid standard base64.
    #[error("invalid payload encoding: {0}")]
    InvalidPayloadEncoding(#[source] base64::DecodeError),

    /// Decoded payload is not JSON or lacks required event fields.
    #[error("malformed logging event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    /// Resource name does not have the bucket object shape.
    #[error("malformed resource name '{resource_name}': {defect}")]
    MalformedResourceName {
        /// Resource name as received.
        resource_name: String,
        /// Which part of the shape was violated.
        defect: ResourceNameDefect,
    },
}

/// Shape violation found in a resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResourceNameDefect {
    /// Fewer `/`-delimited segments than an object name needs.
    #[error("expected at least {min} segments, found {0}", min = MIN_RESOURCE_NAME_SEGMENTS)]
    TooFewSegments(usize),

    /// A fixed marker segment holds something else.
    #[error("expected '{expected}' at segment {index}")]
    UnexpectedMarker {
        /// Zero-based segment index.
        index: usize,
        /// Marker required at that index.
        expected: &'static str,
    },

    /// Bucket segment is empty.
    #[error("bucket segment is empty")]
    EmptyBucket,

    /// Final segment has no name before its first `.`.
    #[error("final segment has no key")]
    EmptyKey,
}

impl LogEventError {
    /// Returns a stable machine-readable label for the failure.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEnvelope(_) => "malformed_envelope",
            Self::InvalidPayloadEncoding(_) => "invalid_payload_encoding",
            Self::MalformedEvent(_) => "malformed_event",
            Self::MalformedResourceName { .. } => "malformed_resource_name",
        }
    }
}

impl From<LogEventError> for AppError {
    fn from(value: LogEventError) -> Self {
        AppError::Validation(value.to_string())
    }
}
