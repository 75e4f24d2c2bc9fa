//! Timestamp kept under a fixed namespace/key in a shared TOML settings file.
//!
//! The settings file may hold other namespaces; they are preserved on write.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::atomic::write_atomic;
use crate::timestamp::errors::StoreError;
use crate::timestamp::traits::TimestampStore;
use crate::timestamp::{format_instant, parse_instant};

pub const SETTINGS_NAMESPACE: &str = "CStats";
pub const TIMESTAMP_KEY: &str = "Timestamp";

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole settings table. Missing file yields an empty table.
    fn load_table(&self) -> Result<toml::Table, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content.parse::<toml::Table>().map_err(|e| e.to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => Err(e.to_string()),
        }
    }
}

impl TimestampStore for SettingsStore {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn save(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
        let mut table = match self.load_table() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(
                    event = "core.timestamp.settings_reset",
                    path = %self.path.display(),
                    error = %e,
                    "Settings file unreadable - rewriting with only the timestamp"
                );
                toml::Table::new()
            }
        };

        let namespace = table
            .entry(SETTINGS_NAMESPACE)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        if !namespace.is_table() {
            *namespace = toml::Value::Table(toml::Table::new());
        }
        if let toml::Value::Table(section) = namespace {
            section.insert(
                TIMESTAMP_KEY.to_string(),
                toml::Value::String(format_instant(instant)),
            );
        }

        let content = toml::to_string(&table).map_err(|e| StoreError::SerializeFailed {
            message: e.to_string(),
        })?;

        write_atomic(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;

        tracing::info!(
            event = "core.timestamp.saved",
            backend = self.name(),
            path = %self.path.display()
        );
        Ok(())
    }

    fn read(&self) -> Option<DateTime<Utc>> {
        let table = match self.load_table() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(
                    event = "core.timestamp.read_failed",
                    backend = self.name(),
                    path = %self.path.display(),
                    error = %e,
                    "Settings file unreadable - treating as never pulled"
                );
                return None;
            }
        };

        let Some(raw) = table
            .get(SETTINGS_NAMESPACE)
            .and_then(|section| section.get(TIMESTAMP_KEY))
            .and_then(|value| value.as_str())
        else {
            tracing::debug!(
                event = "core.timestamp.not_found",
                backend = self.name(),
                path = %self.path.display()
            );
            return None;
        };

        let instant = parse_instant(raw);
        if instant.is_none() {
            tracing::warn!(
                event = "core.timestamp.invalid_instant",
                backend = self.name(),
                value = %raw,
                "Stored timestamp is not ISO-8601 - treating as never pulled"
            );
        }
        instant
    }
}
