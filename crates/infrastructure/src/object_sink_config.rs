//! Storage object sink selection shared by the api and replay binaries.

use std::sync::Arc;
use std::time::Duration;

use docwatch_application::StorageObjectSink;
use docwatch_core::{AppError, AppResult};

use crate::{
    AppSheetConfig, AppSheetStorageObjectSink, HttpAppSheetClient, TracingStorageObjectSink,
};

const DEFAULT_APPSHEET_TIMEOUT_SECONDS: u64 = 15;

/// AppSheet settings read from `APPSHEET_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSheetSinkSettings {
    /// AppSheet application identifier.
    pub application_id: String,
    /// Application access key.
    pub access_key: String,
    /// Table receiving one row per storage object.
    pub table: String,
    /// Endpoint template override.
    pub endpoint_template: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Selected storage object sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectSinkConfig {
    /// Log notices only.
    Log,
    /// Add one AppSheet row per notice.
    AppSheet(AppSheetSinkSettings),
}

impl ObjectSinkConfig {
    /// Reads `OBJECT_SINK` (`log` by default) and, for `appsheet`, the
    /// `APPSHEET_*` variables through `lookup`.
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("OBJECT_SINK")
            .unwrap_or_else(|| "log".to_owned())
            .as_str()
        {
            "log" => Ok(Self::Log),
            "appsheet" => {
                let timeout_seconds = match lookup("APPSHEET_TIMEOUT_SECONDS") {
                    Some(value) => value.parse::<u64>().map_err(|error| {
                        AppError::Validation(format!(
                            "invalid APPSHEET_TIMEOUT_SECONDS value '{value}': {error}"
                        ))
                    })?,
                    None => DEFAULT_APPSHEET_TIMEOUT_SECONDS,
                };
                if timeout_seconds == 0 {
                    return Err(AppError::Validation(
                        "APPSHEET_TIMEOUT_SECONDS must be greater than zero".to_owned(),
                    ));
                }

                Ok(Self::AppSheet(AppSheetSinkSettings {
                    application_id: required_non_empty(lookup, "APPSHEET_APP_ID")?,
                    access_key: required_non_empty(lookup, "APPSHEET_ACCESS_KEY")?,
                    table: required_non_empty(lookup, "APPSHEET_TABLE")?,
                    endpoint_template: lookup("APPSHEET_ENDPOINT_TEMPLATE")
                        .filter(|value| !value.trim().is_empty()),
                    timeout_seconds,
                }))
            }
            other => Err(AppError::Validation(format!(
                "OBJECT_SINK must be either 'log' or 'appsheet', got '{other}'"
            ))),
        }
    }

    /// Returns the `OBJECT_SINK` value this configuration came from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::AppSheet(_) => "appsheet",
        }
    }

    /// Builds the configured sink.
    ///
    /// For AppSheet the endpoint must resolve for the configured table.
    pub fn build(&self) -> AppResult<Arc<dyn StorageObjectSink>> {
        let settings = match self {
            Self::Log => return Ok(Arc::new(TracingStorageObjectSink::new())),
            Self::AppSheet(settings) => settings,
        };

        let mut client_config =
            AppSheetConfig::new(settings.application_id.clone(), settings.access_key.clone());
        if let Some(endpoint_template) = &settings.endpoint_template {
            client_config.endpoint_template = endpoint_template.clone();
        }
        client_config.timeout = Duration::from_secs(settings.timeout_seconds);

        let client = HttpAppSheetClient::new(client_config)?;
        client.endpoint_for(settings.table.as_str())?;

        Ok(Arc::new(AppSheetStorageObjectSink::new(
            client,
            settings.table.clone(),
        )?))
    }
}

fn required_non_empty<F>(lookup: &F, name: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
