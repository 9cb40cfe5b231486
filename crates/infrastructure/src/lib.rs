//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod appsheet_storage_object_sink;
mod http_appsheet_client;
mod object_sink_config;
mod tracing_storage_object_sink;

pub use appsheet_storage_object_sink::{AppSheetStorageObjectSink, StorageObjectRow};
pub use http_appsheet_client::{
    AppSheetConfig, DEFAULT_APPSHEET_ENDPOINT_TEMPLATE, HttpAppSheetClient,
};
pub use object_sink_config::{AppSheetSinkSettings, ObjectSinkConfig};
pub use tracing_storage_object_sink::TracingStorageObjectSink;
