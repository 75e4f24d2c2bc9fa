//! Durable storage of the last successful pull instant.
//!
//! The refresh controller depends only on [`TimestampStore`]; which backend
//! sits behind it is decided once at startup from configuration.

pub mod backends;
pub mod errors;
pub mod traits;
pub mod types;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::config::CstatsConfig;

pub use backends::{JsonFileStore, SettingsStore};
pub use errors::StoreError;
pub use traits::TimestampStore;
pub use types::TimestampBackend;

/// Build the timestamp store selected by `storage.timestamp_backend`.
pub fn open_store(config: &CstatsConfig) -> Box<dyn TimestampStore> {
    let backend = config.storage.timestamp_backend();
    let store: Box<dyn TimestampStore> = match backend {
        TimestampBackend::File => Box::new(JsonFileStore::new(config.timestamp_path())),
        TimestampBackend::Settings => Box::new(SettingsStore::new(config.settings_path())),
    };

    tracing::debug!(event = "core.timestamp.store_opened", backend = %backend);
    store
}

/// Render an instant as ISO-8601 (RFC 3339, UTC, microsecond precision).
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an ISO-8601 instant.
///
/// Offset-qualified values are taken as-is. Naive values (no offset), as
/// written by earlier releases, are interpreted in local time.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    let naive = raw.parse::<NaiveDateTime>().ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use std::path::PathBuf;

    #[test]
    fn test_format_then_parse_is_lossless_to_micros() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(parse_instant(&format_instant(instant)), Some(instant));
    }

    #[test]
    fn test_format_is_iso_8601_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_instant(instant), "2024-01-02T03:04:05.000000Z");
    }

    #[test]
    fn test_parse_offset_timestamp() {
        let parsed = parse_instant("2024-01-02T05:04:05+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_naive_with_and_without_fraction() {
        assert!(parse_instant("2024-01-02T03:04:05").is_some());
        assert!(parse_instant("2024-01-02T03:04:05.654321").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("not a time").is_none());
    }

    #[test]
    fn test_open_store_selects_backend() {
        let config = CstatsConfig {
            storage: StorageConfig {
                timestamp_backend: Some("settings".to_string()),
                settings_file: Some(PathBuf::from("/tmp/cstats-test-settings.toml")),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(open_store(&config).name(), "settings");
        assert_eq!(open_store(&CstatsConfig::default()).name(), "file");
    }
}
