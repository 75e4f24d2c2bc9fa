use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use cstats_core::timestamp::format_instant;
use cstats_core::{ControllerState, TimestampStore, build_controller};

use super::helpers::{format_remaining, load_config_with_warning, load_dashboard_state};

#[derive(Serialize)]
struct StatusOutput {
    last_pull: Option<String>,
    next_allowed_pull: Option<String>,
    cooldown_remaining_secs: Option<i64>,
    state: ControllerState,
    timestamp_backend: String,
    snapshot_path: String,
    snapshot_assets: Option<usize>,
}

pub(crate) fn handle_status_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config_with_warning();

    info!(event = "cli.status.started");

    let controller = build_controller(&config);
    let now = chrono::Utc::now();
    let last_pull = controller.store().read();
    let remaining = controller.cooldown_remaining(now);
    let dashboard = load_dashboard_state(&config)?;

    let output = StatusOutput {
        last_pull: last_pull.map(format_instant),
        next_allowed_pull: controller.next_allowed_pull_at(now).map(format_instant),
        cooldown_remaining_secs: remaining.map(|r| r.num_seconds()),
        state: controller.state_at(now),
        timestamp_backend: config.storage.timestamp_backend().to_string(),
        snapshot_path: config.snapshot_path().display().to_string(),
        snapshot_assets: dashboard.as_ref().map(|d| d.rows().len()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let last = last_pull
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        let next = match remaining {
            Some(r) => format!("in {}", format_remaining(r)),
            None => "now".to_string(),
        };
        let snapshot = match output.snapshot_assets {
            Some(count) => format!("{} assets ({})", count, output.snapshot_path),
            None => format!("none ({})", output.snapshot_path),
        };

        println!("Last pull:         {}", last);
        println!("Next pull allowed: {}", next);
        println!("Snapshot:          {}", snapshot);
        println!("Timestamp store:   {}", output.timestamp_backend);
    }

    info!(event = "cli.status.completed", state = %output.state);
    Ok(())
}
