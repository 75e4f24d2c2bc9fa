//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.cstats/config.toml`
//! 3. **Project config** - `./.cstats/config.toml`
//! 4. **Environment** - `CSTATS_API_KEY`, `CSTATS_DIR` (resolved at use time)
//! 5. **CLI arguments** - Command-line flags (highest priority)

use crate::config::types::{ApiConfig, CstatsConfig, RefreshConfig, StorageConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<CstatsConfig, ConfigError> {
    let mut config = CstatsConfig::default();

    for path in [user_config_path(), project_config_path()]
        .into_iter()
        .flatten()
    {
        match load_config_file(&path) {
            Ok(file_config) => {
                tracing::debug!(
                    event = "core.config.file_loaded",
                    path = %path.display()
                );
                config = merge_configs(config, file_config);
            }
            Err(ConfigError::ConfigNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cstats").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".cstats").join("config.toml"))
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<CstatsConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Every field is optional, so an override only replaces what it sets.
pub fn merge_configs(base: CstatsConfig, override_config: CstatsConfig) -> CstatsConfig {
    CstatsConfig {
        api: ApiConfig {
            endpoint: override_config.api.endpoint.or(base.api.endpoint),
            api_key: override_config.api.api_key.or(base.api.api_key),
            key_header: override_config.api.key_header.or(base.api.key_header),
            limit: override_config.api.limit.or(base.api.limit),
            convert: override_config.api.convert.or(base.api.convert),
            timeout_secs: override_config.api.timeout_secs.or(base.api.timeout_secs),
            max_redirects: override_config.api.max_redirects.or(base.api.max_redirects),
        },
        refresh: RefreshConfig {
            cooldown_minutes: override_config
                .refresh
                .cooldown_minutes
                .or(base.refresh.cooldown_minutes),
        },
        storage: StorageConfig {
            timestamp_backend: override_config
                .storage
                .timestamp_backend
                .or(base.storage.timestamp_backend),
            data_dir: override_config.storage.data_dir.or(base.storage.data_dir),
            settings_file: override_config
                .storage
                .settings_file
                .or(base.storage.settings_file),
        },
    }
}
