//! Configuration type definitions for CStats.
//!
//! These types are deserialized from TOML config files. Every field is
//! optional on disk so that a project config can override a single value
//! without clobbering the rest of the user config; accessors in
//! [`super::defaults`] supply the built-in fallbacks.
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! api_key = "your-api-key"
//! limit = 100
//! convert = "EUR"
//!
//! [refresh]
//! cooldown_minutes = 120
//!
//! [storage]
//! timestamp_backend = "settings"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.cstats/config.toml`
/// 2. Project config: `./.cstats/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CstatsConfig {
    /// Listings API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Pull rate limiting
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Where the snapshot and pull timestamp live
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote listings API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiConfig {
    /// Listings endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key. `CSTATS_API_KEY` takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Header the API key is sent in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_header: Option<String>,

    /// Number of assets to request (`limit` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Quote currency (`convert` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert: Option<String>,

    /// Total request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Redirects followed before the request is abandoned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redirects: Option<u32>,
}

/// Refresh rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RefreshConfig {
    /// Minimum minutes between successful pulls.
    /// Default: 120.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_minutes: Option<u64>,
}

/// Local persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// Timestamp store backend: `file` or `settings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_backend: Option<String>,

    /// Directory for the snapshot and the file timestamp backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Settings file used by the `settings` timestamp backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
}
