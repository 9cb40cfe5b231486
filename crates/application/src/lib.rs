//! Application services and ports.

#![forbid(unsafe_code)]

mod object_notification_service;

pub use object_notification_service::{
    ObjectNotificationService, StorageObjectNotice, StorageObjectSink,
};
