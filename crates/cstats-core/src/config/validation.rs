//! Configuration validation logic.

use crate::config::defaults::MAX_TIMEOUT_SECS;
use crate::config::types::CstatsConfig;
use crate::errors::ConfigError;
use crate::timestamp::TimestampBackend;

/// Largest `limit` the listings API accepts.
pub const MAX_LIMIT: u32 = 5000;
pub const MAX_REDIRECTS_CAP: u32 = 100;
/// One year.
pub const MAX_COOLDOWN_MINUTES: u64 = 525_600;

/// Validate a CstatsConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `api.limit` must be within 1..=5000
/// - `api.convert` must be 3 to 5 ASCII letters
/// - `api.endpoint` must be an http(s) URL
/// - `api.max_redirects` must not exceed 100
/// - `api.timeout_secs`, when set, must be within 1..=300
/// - `refresh.cooldown_minutes`, when set, must not exceed one year (525600)
/// - `storage.timestamp_backend` must be `file` or `settings`
pub fn validate_config(config: &CstatsConfig) -> Result<(), ConfigError> {
    let limit = config.api.limit();
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("api.limit must be between 1 and {}, got {}", MAX_LIMIT, limit),
        });
    }

    let convert = config.api.convert();
    if !(3..=5).contains(&convert.len()) || !convert.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "api.convert must be a 3-5 letter currency code, got '{}'",
                convert
            ),
        });
    }

    let endpoint = config.api.endpoint();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("api.endpoint must be an http(s) URL, got '{}'", endpoint),
        });
    }

    if config.api.max_redirects() > MAX_REDIRECTS_CAP {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "api.max_redirects must not exceed {}, got {}",
                MAX_REDIRECTS_CAP,
                config.api.max_redirects()
            ),
        });
    }

    if let Some(secs) = config.api.timeout_secs
        && (secs == 0 || secs > MAX_TIMEOUT_SECS)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "api.timeout_secs must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECS, secs
            ),
        });
    }

    if let Some(minutes) = config.refresh.cooldown_minutes
        && minutes > MAX_COOLDOWN_MINUTES
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "refresh.cooldown_minutes must not exceed {}, got {}",
                MAX_COOLDOWN_MINUTES, minutes
            ),
        });
    }

    if let Some(ref backend) = config.storage.timestamp_backend
        && TimestampBackend::parse(backend).is_none()
    {
        return Err(ConfigError::InvalidBackend {
            backend: backend.clone(),
        });
    }

    Ok(())
}
