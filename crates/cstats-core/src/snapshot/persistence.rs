//! Snapshot file persistence.
//!
//! The snapshot is replaced wholesale through an atomic rename, so readers
//! see either the previous document or the new one, never a torn write.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::errors::SnapshotError;
use super::types::{LAST_TIME_PULLED_KEY, Snapshot, SnapshotDocument};
use crate::atomic::write_atomic;
use crate::timestamp::format_instant;

/// Inject `LastTimePulled` into a listings response document.
pub fn stamp_document(document: &mut Value, pulled_at: DateTime<Utc>) -> Result<(), SnapshotError> {
    let object = document.as_object_mut().ok_or(SnapshotError::NotAnObject)?;
    object.insert(
        LAST_TIME_PULLED_KEY.to_string(),
        Value::String(format_instant(pulled_at)),
    );
    Ok(())
}

/// Write the snapshot document (4-space indented JSON) atomically.
pub fn save_snapshot(path: &Path, document: &Value) -> Result<(), SnapshotError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| SnapshotError::SerializeFailed {
            message: e.to_string(),
        })?;

    write_atomic(path, &buffer).map_err(|e| SnapshotError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        event = "core.snapshot.saved",
        path = %path.display(),
        bytes = buffer.len()
    );
    Ok(())
}

/// Load the snapshot, resolving quotes in `currency`.
///
/// Returns `Ok(None)` when no snapshot has been written yet.
pub fn load_snapshot(path: &Path, currency: &str) -> Result<Option<Snapshot>, SnapshotError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(event = "core.snapshot.not_found", path = %path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(SnapshotError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let document: SnapshotDocument =
        serde_json::from_str(&content).map_err(|e| SnapshotError::Corrupted {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let snapshot = Snapshot::from_document(&document, currency);
    tracing::debug!(
        event = "core.snapshot.loaded",
        path = %path.display(),
        assets = snapshot.assets.len()
    );
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_stamp_document_injects_field() {
        let mut document = json!({"data": []});
        let instant = Utc.with_ymd_and_hms(2024, 4, 4, 4, 4, 4).unwrap();

        stamp_document(&mut document, instant).unwrap();
        assert_eq!(
            document["LastTimePulled"],
            json!("2024-04-04T04:04:04.000000Z")
        );
    }

    #[test]
    fn test_stamp_document_rejects_arrays() {
        let mut document = json!([1, 2, 3]);
        assert!(matches!(
            stamp_document(&mut document, Utc::now()),
            Err(SnapshotError::NotAnObject)
        ));
    }

    #[test]
    fn test_load_missing_snapshot_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_snapshot(&temp_dir.path().join("crypto_data.json"), "USD").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_preserves_extra_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crypto_data.json");
        let mut document = json!({
            "status": {"credit_count": 1},
            "data": [{
                "name": "Ethereum",
                "symbol": "ETH",
                "total_supply": 120000000.0,
                "quote": {"USD": {"price": 3100.5}}
            }]
        });
        stamp_document(&mut document, Utc::now()).unwrap();
        save_snapshot(&path, &document).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["status"]["credit_count"], json!(1));

        let snapshot = load_snapshot(&path, "USD").unwrap().unwrap();
        assert_eq!(snapshot.assets.len(), 1);
        assert_eq!(snapshot.assets[0].symbol, "ETH");
        assert!(snapshot.last_time_pulled.is_some());
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crypto_data.json");
        save_snapshot(&path, &json!({"data": []})).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"data\""), "got: {}", raw);
    }

    #[test]
    fn test_load_corrupted_snapshot_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crypto_data.json");
        std::fs::write(&path, "{\"data\": [").unwrap();

        assert!(matches!(
            load_snapshot(&path, "USD"),
            Err(SnapshotError::Corrupted { .. })
        ));
    }
}
