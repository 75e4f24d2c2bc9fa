use clap::ArgMatches;
use tracing::info;

use super::helpers::{
    NO_DATA_MESSAGE, load_config_with_warning, load_dashboard_state, sort_from_matches,
};
use crate::table::TableFormatter;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let (sort_key, sort_order) = sort_from_matches(matches);
    let config = load_config_with_warning();

    info!(event = "cli.list.started", sort = %sort_key);

    let Some(mut state) = load_dashboard_state(&config)? else {
        if json_output {
            println!("[]");
        } else {
            println!("{}", NO_DATA_MESSAGE);
        }
        info!(event = "cli.list.completed", count = 0);
        return Ok(());
    };

    state.sort_by(sort_key, sort_order);

    if json_output {
        println!("{}", serde_json::to_string_pretty(state.rows())?);
    } else if state.rows().is_empty() {
        println!("Snapshot contains no listings.");
    } else {
        TableFormatter::new(state.rows()).print_table(state.rows());
    }

    info!(event = "cli.list.completed", count = state.rows().len());
    Ok(())
}
