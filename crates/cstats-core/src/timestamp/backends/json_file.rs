//! Timestamp kept in a small JSON document: `{"Timestamp": "<ISO-8601>"}`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::atomic::write_atomic;
use crate::timestamp::errors::StoreError;
use crate::timestamp::traits::TimestampStore;
use crate::timestamp::{format_instant, parse_instant};

#[derive(Debug, Serialize, Deserialize)]
struct TimestampDocument {
    #[serde(rename = "Timestamp")]
    timestamp: Option<String>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimestampStore for JsonFileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn save(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
        let document = TimestampDocument {
            timestamp: Some(format_instant(instant)),
        };
        let json =
            serde_json::to_string(&document).map_err(|e| StoreError::SerializeFailed {
                message: e.to_string(),
            })?;

        write_atomic(&self.path, json.as_bytes()).map_err(|e| StoreError::WriteFailed {
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
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    event = "core.timestamp.not_found",
                    backend = self.name(),
                    path = %self.path.display()
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.timestamp.read_failed",
                    backend = self.name(),
                    path = %self.path.display(),
                    error = %e,
                    "Timestamp file unreadable - treating as never pulled"
                );
                return None;
            }
        };

        let raw = match serde_json::from_str::<TimestampDocument>(&content) {
            Ok(document) => document.timestamp?,
            Err(e) => {
                tracing::warn!(
                    event = "core.timestamp.parse_failed",
                    backend = self.name(),
                    path = %self.path.display(),
                    error = %e,
                    "Timestamp file is not valid JSON - treating as never pulled"
                );
                return None;
            }
        };

        let instant = parse_instant(&raw);
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
