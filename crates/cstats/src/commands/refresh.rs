use clap::ArgMatches;
use tracing::info;

use cstats_core::build_controller;

use super::helpers::{load_config_with_warning, status_result};

pub(crate) fn handle_refresh_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config_with_warning();

    info!(event = "cli.refresh.started");

    let controller = build_controller(&config);
    let status = controller.check_and_pull();

    if json_output {
        println!("{}", serde_json::to_string(&status)?);
    } else {
        println!("{}", status.summary());
    }

    info!(
        event = "cli.refresh.completed",
        code = status.code(),
        kind = status.kind()
    );
    status_result(&status)
}
