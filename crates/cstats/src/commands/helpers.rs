use clap::ArgMatches;
use tracing::{error, warn};

use cstats_core::events;
use cstats_core::{
    CstatsConfig, DashboardState, RefreshStatus, SortKey, SortOrder, load_snapshot,
};

/// Load configuration, falling back to defaults with a warning on error.
pub fn load_config_with_warning() -> CstatsConfig {
    match CstatsConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.cstats/config.toml and ./.cstats/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            CstatsConfig::default()
        }
    }
}

/// Read `--sort` and `--desc`. Clap restricts `--sort` to known keys.
pub fn sort_from_matches(matches: &ArgMatches) -> (SortKey, SortOrder) {
    let key = matches
        .get_one::<String>("sort")
        .and_then(|s| SortKey::parse(s))
        .unwrap_or_default();
    let order = if matches.get_flag("desc") {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    (key, order)
}

/// Dashboard state for the snapshot on disk, or `None` before the first pull.
pub fn load_dashboard_state(
    config: &CstatsConfig,
) -> Result<Option<DashboardState>, Box<dyn std::error::Error>> {
    let path = config.snapshot_path();
    match load_snapshot(&path, &config.api.convert()) {
        Ok(snapshot) => Ok(snapshot.as_ref().map(DashboardState::from_snapshot)),
        Err(e) => {
            error!(
                event = "cli.snapshot.load_failed",
                path = %path.display(),
                error = %e
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub const NO_DATA_MESSAGE: &str = "No data pulled yet. Run 'cstats refresh' to fetch listings.";

/// Turn a failed pull into a command error so the process exits non-zero.
pub fn status_result(status: &RefreshStatus) -> Result<(), Box<dyn std::error::Error>> {
    if status.is_failure() {
        Err(format!("Refresh failed: {}", status.summary()).into())
    } else {
        Ok(())
    }
}

/// Render a non-negative duration as `1h 30m` / `45m 10s` / `12s`.
pub fn format_remaining(remaining: chrono::Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
