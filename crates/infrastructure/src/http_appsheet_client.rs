use std::time::Duration;

use docwatch_core::{AppError, AppResult};
use docwatch_domain::AppSheetRequest;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Public AppSheet action endpoint; `{appId}` and `{tableName}` are substituted per call.
pub const DEFAULT_APPSHEET_ENDPOINT_TEMPLATE: &str =
    "https://api.appsheet.com/api/v2/apps/{appId}/tables/{tableName}/Action";

const ACCESS_KEY_HEADER: &str = "applicationaccesskey";
const APP_ID_PLACEHOLDER: &str = "{appId}";
const TABLE_NAME_PLACEHOLDER: &str = "{tableName}";

/// AppSheet client configuration.
#[derive(Clone)]
pub struct AppSheetConfig {
    /// Endpoint template containing `{appId}` and `{tableName}`.
    pub endpoint_template: String,
    /// AppSheet application identifier.
    pub application_id: String,
    /// Application access key sent with every request.
    pub application_access_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AppSheetConfig {
    /// Creates a configuration for the public endpoint.
    #[must_use]
    pub fn new(application_id: impl Into<String>, application_access_key: impl Into<String>) -> Self {
        Self {
            endpoint_template: DEFAULT_APPSHEET_ENDPOINT_TEMPLATE.to_owned(),
            application_id: application_id.into(),
            application_access_key: application_access_key.into(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// reqwest-backed client for AppSheet table actions.
#[derive(Clone)]
pub struct HttpAppSheetClient {
    http_client: reqwest::Client,
    endpoint_template: String,
    application_id: String,
}

impl HttpAppSheetClient {
    /// Builds a client that attaches the access key to every request.
    pub fn new(config: AppSheetConfig) -> AppResult<Self> {
        let mut access_key =
            HeaderValue::from_str(config.application_access_key.as_str()).map_err(|error| {
                AppError::Validation(format!("invalid AppSheet access key: {error}"))
            })?;
        access_key.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(HeaderName::from_static(ACCESS_KEY_HEADER), access_key);

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            endpoint_template: config.endpoint_template,
            application_id: config.application_id,
        })
    }

    /// Resolves the action endpoint for a table.
    ///
    /// The table name becomes a single percent-encoded path segment.
    pub fn endpoint_for(&self, table: &str) -> AppResult<Url> {
        let template = self
            .endpoint_template
            .replace(APP_ID_PLACEHOLDER, self.application_id.as_str());
        let Some((prefix, suffix)) = template.split_once(TABLE_NAME_PLACEHOLDER) else {
            return Err(AppError::Validation(format!(
                "AppSheet endpoint template '{}' lacks {}",
                self.endpoint_template, TABLE_NAME_PLACEHOLDER
            )));
        };

        let mut endpoint = Url::parse(prefix).map_err(|error| {
            AppError::Validation(format!("invalid AppSheet endpoint '{prefix}': {error}"))
        })?;
        endpoint
            .path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!("AppSheet endpoint '{prefix}' cannot carry a path"))
            })?
            .pop_if_empty()
            .push(table)
            .extend(suffix.split('/').filter(|segment| !segment.is_empty()));

        Ok(endpoint)
    }

    /// Posts a table action and returns the response document.
    pub async fn execute<R>(&self, request: &AppSheetRequest<R>) -> AppResult<Value>
    where
        R: Serialize + Sync,
    {
        let endpoint = self.endpoint_for(request.table())?;
        let response = self
            .http_client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|error| {
                AppError::Upstream(format!(
                    "AppSheet {} on table '{}' failed: {error}",
                    request.action().as_str(),
                    request.table()
                ))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "AppSheet {} on table '{}' returned status {}: {}",
                request.action().as_str(),
                request.table(),
                status.as_u16(),
                body.trim()
            )));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(body.as_str()).map_err(|error| {
            AppError::Upstream(format!("invalid AppSheet response body: {error}"))
        })
    }
}
