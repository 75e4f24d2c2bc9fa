//! cstats-core: Core library for the CStats cryptocurrency dashboard
//!
//! This library pulls a price listing from a remote API under a cooldown,
//! keeps the latest response on disk and prepares it for display. It is used
//! by the `cstats` CLI.
//!
//! # Main Entry Points
//!
//! - [`refresh`] - Rate-limited check-and-pull
//! - [`fetch`] - Remote listings fetcher
//! - [`snapshot`] - Persisted response document
//! - [`timestamp`] - Last-pull timestamp stores
//! - [`dashboard`] - Formatting, rows, sorting and selection
//! - [`config`] - Configuration management

mod atomic;

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod fetch;
pub mod logging;
pub mod refresh;
pub mod snapshot;
pub mod timestamp;

// Re-export commonly used types at crate root for convenience
pub use config::CstatsConfig;
pub use dashboard::{DashboardState, DetailPanel, DisplayRow, SortKey, SortOrder, Trend};
pub use errors::{ConfigError, CstatsError};
pub use fetch::{FetchOutcome, HttpFetcher, ListingsSource};
pub use refresh::{ControllerState, RefreshController, RefreshStatus, build_controller};
pub use snapshot::{AssetRecord, Snapshot, SnapshotError, load_snapshot};
pub use timestamp::{StoreError, TimestampBackend, TimestampStore, open_store};

// Re-export logging initialization
pub use logging::init_logging;
