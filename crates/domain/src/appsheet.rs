use std::collections::BTreeMap;

use docwatch_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Locale sent with every AppSheet action unless overridden.
pub const DEFAULT_APPSHEET_LOCALE: &str = "en-US";

/// Table action supported by the AppSheet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppSheetAction {
    /// Adds new rows.
    Add,
    /// Updates existing rows by key.
    Edit,
    /// Deletes rows by key.
    Delete,
    /// Reads rows.
    Find,
}

impl AppSheetAction {
    /// Returns the action name expected by the API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Find => "Find",
        }
    }
}

/// Request properties shared by every AppSheet action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSheetProperties {
    /// Locale used to parse and format values.
    pub locale: String,
    /// Caller location, `"lat, long"`.
    pub location: String,
    /// Caller timezone name.
    pub timezone: String,
    /// Values for the app's user settings.
    pub user_settings: BTreeMap<String, String>,
}

impl Default for AppSheetProperties {
    fn default() -> Self {
        Self {
            locale: DEFAULT_APPSHEET_LOCALE.to_owned(),
            location: String::new(),
            timezone: String::new(),
            user_settings: BTreeMap::new(),
        }
    }
}

/// Row mutation request for one AppSheet table.
///
/// All rows of a request share one row type `R`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSheetRequest<R> {
    #[serde(skip)]
    table: NonEmptyString,
    action: AppSheetAction,
    properties: AppSheetProperties,
    rows: Vec<R>,
}

impl<R> AppSheetRequest<R> {
    /// Creates an empty request with default properties.
    pub fn new(table: impl Into<String>, action: AppSheetAction) -> AppResult<Self> {
        Ok(Self {
            table: NonEmptyString::new(table)?,
            action,
            properties: AppSheetProperties::default(),
            rows: Vec::new(),
        })
    }

    /// Appends rows to the request.
    #[must_use]
    pub fn add_rows(mut self, rows: impl IntoIterator<Item = R>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Appends one row to the request.
    #[must_use]
    pub fn add_row(mut self, row: R) -> Self {
        self.rows.push(row);
        self
    }

    /// Overrides the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.properties.locale = locale.into();
        self
    }

    /// Sets the caller location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.properties.location = location.into();
        self
    }

    /// Sets the caller timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.properties.timezone = timezone.into();
        self
    }

    /// Sets one user setting value.
    #[must_use]
    pub fn with_user_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.user_settings.insert(name.into(), value.into());
        self
    }

    /// Returns the target table name.
    #[must_use]
    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    /// Returns the requested action.
    #[must_use]
    pub fn action(&self) -> AppSheetAction {
        self.action
    }

    /// Returns the request properties.
    #[must_use]
    pub fn properties(&self) -> &AppSheetProperties {
        &self.properties
    }

    /// Returns the queued rows.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }
}
