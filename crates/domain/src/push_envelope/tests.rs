use std::thread;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

use super::{
    EncodedPayload, RawPubSubMessage, RawPushEnvelope, decode_push_envelope,
    decode_push_envelope_from_reader,
};
use crate::error::LogEventError;
use crate::log_event::{
    AuthenticationInfo, AuthorizationInfo, LoggingEvent, MonitoredResource, ProtoPayload,
    RequestMetadata, ResourceLabels, ResourceLocation,
};

fn timestamp(seconds: i64, nanos: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, nanos)
        .single()
        .unwrap_or_else(|| panic!("invalid test timestamp"))
}

fn sample_event(resource_name: &str) -> LoggingEvent {
    LoggingEvent {
        insert_id: "-7qtkd2e1b3w9".to_owned(),
        log_name: "projects/holy-diver-297719/logs/cloudaudit.googleapis.com%2Fdata_access"
            .to_owned(),
        proto_payload: ProtoPayload {
            type_url: "type.googleapis.com/google.cloud.audit.AuditLog".to_owned(),
            authentication_info: AuthenticationInfo {
                principal_email: "appsheet@holy-diver-297719.iam.gserviceaccount.com".to_owned(),
                service_account_key_name: None,
            },
            authorization_info: vec![AuthorizationInfo {
                granted: true,
                permission: "storage.objects.create".to_owned(),
                resource: resource_name.to_owned(),
                resource_attributes: Map::new(),
            }],
            method_name: "storage.objects.create".to_owned(),
            request_metadata: RequestMetadata {
                caller_ip: "2600:1900::1".to_owned(),
                caller_supplied_user_agent: "AppSheet".to_owned(),
                ..RequestMetadata::default()
            },
            resource_location: ResourceLocation {
                current_locations: vec!["us-central1".to_owned()],
            },
            resource_name: resource_name.to_owned(),
            service_name: "storage.googleapis.com".to_owned(),
            status: Map::new(),
        },
        receive_timestamp: timestamp(1_700_000_001, 987_654_321),
        resource: MonitoredResource {
            labels: ResourceLabels {
                bucket_name: "my-bucket".to_owned(),
                location: "us-central1".to_owned(),
                project_id: "holy-diver-297719".to_owned(),
            },
            resource_type: "gcs_bucket".to_owned(),
        },
        severity: "INFO".to_owned(),
        timestamp: timestamp(1_700_000_000, 123_000_000),
    }
}

fn envelope_body(data: &str, message_id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "message": {
            "attributes": { "logging.googleapis.com/timestamp": "2023-11-14T22:13:20.123Z" },
            "data": data,
            "messageId": message_id,
            "publishTime": "2023-11-14T22:13:21.5Z"
        },
        "subscription": "projects/holy-diver-297719/subscriptions/docai-push"
    }))
    .unwrap_or_else(|error| panic!("{error}"))
}

fn encoded(event: &LoggingEvent) -> String {
    EncodedPayload::encode(event)
        .map(|payload| payload.as_str().to_owned())
        .unwrap_or_else(|error| panic!("{error}"))
}

#[test]
fn envelope_round_trip_reproduces_event() {
    let event = sample_event("projects/_/buckets/my-bucket/objects/folder/sub/file.ext1.ext2");
    let raw = RawPushEnvelope {
        message: RawPubSubMessage {
            attributes: Map::from_iter([("origin".to_owned(), json!("test"))]),
            data: EncodedPayload::encode(&event).unwrap_or_else(|error| panic!("{error}")),
            message_id: "2070443601311540".to_owned(),
            publish_time: timestamp(1_700_000_002, 5),
        },
        subscription: "projects/p/subscriptions/s".to_owned(),
    };
    let body = serde_json::to_vec(&raw).unwrap_or_else(|error| panic!("{error}"));

    let envelope = decode_push_envelope(&body).unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(envelope.message.payload, event);
    assert_eq!(envelope.message.message_id, "2070443601311540");
    assert_eq!(envelope.message.publish_time, timestamp(1_700_000_002, 5));
    assert_eq!(envelope.message.attributes.get("origin"), Some(&json!("test")));
    assert_eq!(envelope.subscription, "projects/p/subscriptions/s");
}

#[test]
fn reader_and_slice_entry_points_agree() {
    let event = sample_event("projects/_/buckets/b/objects/x/y/z.pdf");
    let body = envelope_body(&encoded(&event), "42");

    let from_slice = decode_push_envelope(&body).unwrap_or_else(|error| panic!("{error}"));
    let from_reader =
        decode_push_envelope_from_reader(body.as_slice()).unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(from_slice, from_reader);
}

#[test]
fn missing_attributes_decode_as_empty_map() {
    let event = sample_event("projects/_/buckets/b/objects/x/y/z.pdf");
    let body = serde_json::to_vec(&json!({
        "message": {
            "data": encoded(&event),
            "messageId": "7",
            "publishTime": "2023-11-14T22:13:21Z"
        },
        "subscription": "s"
    }))
    .unwrap_or_else(|error| panic!("{error}"));

    let envelope = decode_push_envelope(&body).unwrap_or_else(|error| panic!("{error}"));

    assert!(envelope.message.attributes.is_empty());
}

#[test]
fn truncated_envelope_is_malformed_envelope() {
    let result = decode_push_envelope(br#"{"message": {"data": "e30=""#);

    assert!(matches!(result, Err(LogEventError::MalformedEnvelope(_))));
}

#[test]
fn envelope_without_data_is_malformed_envelope() {
    let body = br#"{"message": {"messageId": "1", "publishTime": "2023-11-14T22:13:21Z"}, "subscription": "s"}"#;

    assert!(matches!(
        decode_push_envelope(body),
        Err(LogEventError::MalformedEnvelope(_))
    ));
}

#[test]
fn non_string_data_is_malformed_envelope() {
    let body = br#"{"message": {"data": 12, "messageId": "1", "publishTime": "2023-11-14T22:13:21Z"}, "subscription": "s"}"#;

    assert!(matches!(
        decode_push_envelope(body),
        Err(LogEventError::MalformedEnvelope(_))
    ));
}

#[test]
fn unpadded_payload_is_invalid_encoding() {
    let body = envelope_body("e30", "1");

    assert!(matches!(
        decode_push_envelope(&body),
        Err(LogEventError::InvalidPayloadEncoding(_))
    ));
}

#[test]
fn url_safe_alphabet_is_invalid_encoding() {
    let body = envelope_body("e30_", "1");

    assert!(matches!(
        decode_push_envelope(&body),
        Err(LogEventError::InvalidPayloadEncoding(_))
    ));
}

#[test]
fn non_json_payload_is_malformed_event() {
    let body = envelope_body(&STANDARD.encode("not json"), "1");

    assert!(matches!(
        decode_push_envelope(&body),
        Err(LogEventError::MalformedEvent(_))
    ));
}

#[test]
fn payload_missing_event_fields_is_malformed_event() {
    let body = envelope_body("e30=", "1");

    assert!(matches!(
        decode_push_envelope(&body),
        Err(LogEventError::MalformedEvent(_))
    ));
}

#[test]
fn concurrent_decodes_do_not_interfere() {
    let bodies: Vec<(String, Vec<u8>)> = (0..8)
        .map(|index| {
            let name = format!("projects/_/buckets/bucket-{index}/objects/a/b/file-{index}.pdf");
            let body = envelope_body(&encoded(&sample_event(&name)), &index.to_string());
            (name, body)
        })
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = bodies
            .iter()
            .map(|(name, body)| {
                scope.spawn(move || {
                    let envelope =
                        decode_push_envelope(body).unwrap_or_else(|error| panic!("{error}"));
                    assert_eq!(envelope.message.payload.resource_name(), name.as_str());
                    envelope
                        .message
                        .payload
                        .object_identity()
                        .unwrap_or_else(|error| panic!("{error}"))
                })
            })
            .collect();

        for (index, handle) in handles.into_iter().enumerate() {
            let identity = handle.join().unwrap_or_else(|_| panic!("decode thread panicked"));
            assert_eq!(identity.bucket(), format!("bucket-{index}"));
            assert_eq!(identity.key(), format!("file-{index}"));
        }
    });
}

proptest! {
    #[test]
    fn foreign_character_in_payload_is_invalid_encoding(
        position in any::<prop::sample::Index>(),
        foreign in prop::sample::select(vec!['!', '*', '-', '_', ' ', '~', '#', '.', ':']),
    ) {
        let mut data = encoded(&sample_event("projects/_/buckets/b/objects/x/y/z.pdf"));
        let offset = position.index(data.len() + 1);
        data.insert(offset, foreign);

        let result = decode_push_envelope(&envelope_body(&data, "1"));
        prop_assert!(matches!(result, Err(LogEventError::InvalidPayloadEncoding(_))));
    }

    #[test]
    fn encoded_events_round_trip(
        insert_id in "[A-Za-z0-9-]{1,24}",
        severity in prop::sample::select(vec!["DEFAULT", "INFO", "NOTICE", "ERROR"]),
        bucket in "[a-z0-9-]{3,30}",
        file in "[^/]{1,40}",
        seconds in 0_i64..4_000_000_000,
        nanos in 0_u32..1_000_000_000,
    ) {
        let mut event = sample_event(&format!("projects/_/buckets/{bucket}/objects/a/b/{file}"));
        event.insert_id = insert_id;
        event.severity = severity.to_owned();
        event.timestamp = timestamp(seconds, nanos);

        let body = envelope_body(&encoded(&event), "round-trip");
        let decoded = decode_push_envelope(&body).map(|envelope| envelope.message.payload);

        prop_assert_eq!(decoded.ok(), Some(event));
    }
}

#[test]
fn payload_bytes_are_the_json_document() {
    let event = sample_event("projects/_/buckets/b/objects/x/y/z.pdf");
    let payload = EncodedPayload::encode(&event).unwrap_or_else(|error| panic!("{error}"));

    let bytes = payload.decode_bytes().unwrap_or_else(|error| panic!("{error}"));
    let document: Value = serde_json::from_slice(&bytes).unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(
        document.pointer("/protoPayload/resourceName"),
        Some(&json!("projects/_/buckets/b/objects/x/y/z.pdf"))
    );
}
