//! Push subscription envelopes and the two-stage payload decode.
//!
//! The `data` field of a push message is a base64 string whose decoded bytes
//! are a second JSON document. The outer document is parsed first with the
//! field kept as an [`EncodedPayload`]; the payload is decoded in a separate
//! step so both stages fail with their own error.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LogEventError;
use crate::log_event::LoggingEvent;

/// Base64 text of a JSON-encoded [`LoggingEvent`], not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// Wraps base64 text received on the wire.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encodes an event the way publishers place it in `data`.
    pub fn encode(event: &LoggingEvent) -> Result<Self, LogEventError> {
        let json = serde_json::to_vec(event).map_err(LogEventError::MalformedEvent)?;
        Ok(Self(STANDARD.encode(json)))
    }

    /// Returns the base64 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Reverses the base64 encoding.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, LogEventError> {
        STANDARD
            .decode(self.0.as_bytes())
            .map_err(LogEventError::InvalidPayloadEncoding)
    }

    /// Reverses the base64 encoding and parses the bytes as an event.
    pub fn decode(&self) -> Result<LoggingEvent, LogEventError> {
        let bytes = self.decode_bytes()?;
        serde_json::from_slice(&bytes).map_err(LogEventError::MalformedEvent)
    }
}

/// Push envelope as delivered, with the payload still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPushEnvelope {
    /// Delivered message.
    pub message: RawPubSubMessage,
    /// Subscription that pushed the message.
    pub subscription: String,
}

/// Delivered message with the payload still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPubSubMessage {
    /// Publisher attributes.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Encoded event payload.
    pub data: EncodedPayload,
    /// Delivery identifier.
    pub message_id: String,
    /// Publication time.
    pub publish_time: DateTime<Utc>,
}

impl RawPushEnvelope {
    /// Decodes the nested payload, consuming the raw envelope.
    pub fn decode(self) -> Result<PushEnvelope, LogEventError> {
        Ok(PushEnvelope {
            message: self.message.decode()?,
            subscription: self.subscription,
        })
    }
}

impl RawPubSubMessage {
    /// Decodes the nested payload and carries the metadata over.
    pub fn decode(self) -> Result<PubSubMessage, LogEventError> {
        let payload = self.data.decode()?;

        Ok(PubSubMessage {
            attributes: self.attributes,
            message_id: self.message_id,
            publish_time: self.publish_time,
            payload,
        })
    }
}

/// Push envelope with a fully decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PushEnvelope {
    /// Decoded message.
    pub message: PubSubMessage,
    /// Subscription that pushed the message.
    pub subscription: String,
}

/// Delivered message with a fully decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PubSubMessage {
    /// Publisher attributes.
    pub attributes: Map<String, Value>,
    /// Delivery identifier.
    pub message_id: String,
    /// Publication time.
    pub publish_time: DateTime<Utc>,
    /// Decoded audit log entry.
    pub payload: LoggingEvent,
}

/// Decodes a push envelope from a request body.
pub fn decode_push_envelope(body: &[u8]) -> Result<PushEnvelope, LogEventError> {
    let raw: RawPushEnvelope =
        serde_json::from_slice(body).map_err(LogEventError::MalformedEnvelope)?;
    raw.decode()
}

/// Decodes a push envelope from any byte stream.
pub fn decode_push_envelope_from_reader<R: Read>(reader: R) -> Result<PushEnvelope, LogEventError> {
    let raw: RawPushEnvelope =
        serde_json::from_reader(reader).map_err(LogEventError::MalformedEnvelope)?;
    raw.decode()
}

#[cfg(test)]
mod tests;
