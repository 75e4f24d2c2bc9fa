use clap::ArgMatches;
use tracing::info;

use cstats_core::{DashboardState, build_controller};

use super::helpers::{
    load_config_with_warning, load_dashboard_state, sort_from_matches, status_result,
};
use crate::table::TableFormatter;

/// Refresh if the cooldown allows it, then render whatever snapshot is on disk.
pub(crate) fn handle_dashboard_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let (sort_key, sort_order) = sort_from_matches(matches);
    let config = load_config_with_warning();

    info!(event = "cli.dashboard.started", sort = %sort_key);

    let status = build_controller(&config).check_and_pull();

    let mut state = load_dashboard_state(&config)?
        .unwrap_or_else(|| DashboardState::empty(&config.api.convert()));
    state.set_status(status.clone());
    state.sort_by(sort_key, sort_order);

    println!("{}", state.status_line());
    if !state.rows().is_empty() {
        TableFormatter::new(state.rows()).print_table(state.rows());
    }

    info!(
        event = "cli.dashboard.completed",
        code = status.code(),
        rows = state.rows().len()
    );
    status_result(&status)
}
