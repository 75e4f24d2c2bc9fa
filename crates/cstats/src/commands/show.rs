use clap::ArgMatches;
use tracing::{info, warn};

use cstats_core::{DetailPanel, Trend};

use super::helpers::{NO_DATA_MESSAGE, load_config_with_warning, load_dashboard_state};

pub(crate) fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let query = matches
        .get_one::<String>("asset")
        .ok_or("Asset rank or symbol is required")?;
    let config = load_config_with_warning();

    info!(event = "cli.show.started", asset = %query);

    let Some(mut state) = load_dashboard_state(&config)? else {
        return Err(NO_DATA_MESSAGE.into());
    };

    if state.select(query).is_none() {
        warn!(event = "cli.show.not_found", asset = %query);
        return Err(format!("No asset matching '{}' in the last pull", query).into());
    }
    let Some(detail) = state.detail() else {
        return Err(format!("No asset matching '{}' in the last pull", query).into());
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }

    info!(event = "cli.show.completed", symbol = %detail.symbol, rank = detail.rank);
    Ok(())
}

fn print_detail(detail: &DetailPanel) {
    println!("#{} {} ({})", detail.rank, detail.name, detail.symbol);
    println!("  Price:        {}", detail.price);
    println!("  Total Supply: {}", detail.total_supply);
    match detail.trend {
        Some(Trend::Up) => println!("  24h Change:   {} (up)", detail.day_change),
        Some(Trend::Down) => println!("  24h Change:   {} (down)", detail.day_change),
        None => println!("  24h Change:   {}", detail.day_change),
    }
}
