//! Built-in defaults and resolved accessors for configuration types.

use crate::config::types::{ApiConfig, CstatsConfig, RefreshConfig, StorageConfig};
use crate::timestamp::TimestampBackend;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
pub const DEFAULT_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
pub const DEFAULT_LIMIT: u32 = 50;
pub const DEFAULT_CONVERT: &str = "USD";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MAX_REDIRECTS: u32 = 30;
pub const DEFAULT_COOLDOWN_MINUTES: u64 = 120;

pub const SNAPSHOT_FILE_NAME: &str = "crypto_data.json";
pub const TIMESTAMP_FILE_NAME: &str = "timestamp.json";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Env var overriding the data directory.
pub const DATA_DIR_ENV: &str = "CSTATS_DIR";
/// Env var overriding the API key.
pub const API_KEY_ENV: &str = "CSTATS_API_KEY";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl ApiConfig {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Returns the API key, preferring `CSTATS_API_KEY` over the config file.
    pub fn api_key(&self) -> Option<String> {
        non_empty_env(API_KEY_ENV).or_else(|| self.api_key.clone())
    }

    pub fn key_header(&self) -> &str {
        self.key_header.as_deref().unwrap_or(DEFAULT_KEY_HEADER)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Quote currency code, upper-cased.
    pub fn convert(&self) -> String {
        self.convert
            .as_deref()
            .unwrap_or(DEFAULT_CONVERT)
            .to_ascii_uppercase()
    }

    /// Request timeout, capped at [`MAX_TIMEOUT_SECS`].
    pub fn timeout(&self) -> Duration {
        let secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs.min(MAX_TIMEOUT_SECS))
    }

    pub fn max_redirects(&self) -> u32 {
        self.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS)
    }
}

impl RefreshConfig {
    /// Returns the cooldown between successful pulls, defaulting to 2 hours.
    pub fn cooldown(&self) -> chrono::Duration {
        let minutes = self.cooldown_minutes.unwrap_or(DEFAULT_COOLDOWN_MINUTES);
        let minutes = i64::try_from(minutes).unwrap_or(i64::MAX).min(i64::MAX / 60_000);
        chrono::Duration::minutes(minutes)
    }
}

impl StorageConfig {
    /// Returns the configured backend, falling back to `file` when unset
    /// or unrecognized (validation rejects unrecognized values earlier).
    pub fn timestamp_backend(&self) -> TimestampBackend {
        self.timestamp_backend
            .as_deref()
            .and_then(TimestampBackend::parse)
            .unwrap_or_default()
    }
}

impl CstatsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base directory for all CStats data.
    ///
    /// Resolution order: `CSTATS_DIR`, `storage.data_dir`, `~/.cstats`.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = non_empty_env(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }

        match dirs::home_dir() {
            Some(home) => home.join(".cstats"),
            None => {
                tracing::error!(
                    event = "core.config.home_dir_not_found",
                    fallback = ".",
                    "Could not determine home directory - using current directory as fallback"
                );
                PathBuf::from(".").join(".cstats")
            }
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir().join(SNAPSHOT_FILE_NAME)
    }

    pub fn timestamp_path(&self) -> PathBuf {
        self.data_dir().join(TIMESTAMP_FILE_NAME)
    }

    /// Settings file for the `settings` backend.
    ///
    /// Lives in the OS config directory unless overridden. When the data
    /// directory is redirected through `CSTATS_DIR`, the settings file follows
    /// it so that isolated runs never touch the user's real settings.
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.settings_file {
            return path.clone();
        }
        if non_empty_env(DATA_DIR_ENV).is_some() {
            return self.data_dir().join(SETTINGS_FILE_NAME);
        }
        match dirs::config_dir() {
            Some(dir) => dir.join("cstats").join(SETTINGS_FILE_NAME),
            None => self.data_dir().join(SETTINGS_FILE_NAME),
        }
    }
}
