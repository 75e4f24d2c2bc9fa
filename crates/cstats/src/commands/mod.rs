use clap::ArgMatches;
use tracing::error;

use cstats_core::events;

pub mod helpers;

mod dashboard;
mod list;
mod refresh;
mod show;
mod status;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("refresh", sub_matches)) => refresh::handle_refresh_command(sub_matches),
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches),
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches),
        Some(("dashboard", sub_matches)) => dashboard::handle_dashboard_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
