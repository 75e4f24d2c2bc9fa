//! # Configuration System
//!
//! Hierarchical TOML configuration for CStats.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.cstats/config.toml`
//! 3. **Project config** - `./.cstats/config.toml`
//! 4. **Environment** - `CSTATS_API_KEY`, `CSTATS_DIR`
//! 5. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.cstats/config.toml
//! [api]
//! api_key = "your-api-key"
//! limit = 50
//! convert = "USD"
//!
//! [refresh]
//! cooldown_minutes = 120
//! ```
//!
//! ```rust,no_run
//! use cstats_core::config::CstatsConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CstatsConfig::load_hierarchy()?;
//!     println!("snapshot at {}", config.snapshot_path().display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{ApiConfig, CstatsConfig, RefreshConfig, StorageConfig};
pub use validation::validate_config;

impl CstatsConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
