use clap::{Arg, ArgAction, Command};

const SORT_KEYS: [&str; 7] = [
    "rank",
    "name",
    "price",
    "change-1h",
    "change-24h",
    "market-cap",
    "supply",
];

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn sort_args() -> [Arg; 2] {
    [
        Arg::new("sort")
            .long("sort")
            .short('s')
            .help("Column to sort the table by")
            .value_parser(SORT_KEYS)
            .default_value("rank"),
        Arg::new("desc")
            .long("desc")
            .help("Sort in descending order")
            .action(ArgAction::SetTrue),
    ]
}

pub fn build_cli() -> Command {
    Command::new("cstats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cryptocurrency price dashboard with a rate-limited API refresh")
        .long_about("CStats pulls the latest cryptocurrency listings from the CoinMarketCap API at most once per cooldown window, keeps the response on disk and renders it as a sortable table with a detail view.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("refresh")
                .about("Pull fresh listings if the cooldown has elapsed")
                .arg(json_arg())
        )
        .subcommand(
            Command::new("list")
                .about("Show the listings table from the last pull")
                .args(sort_args())
                .arg(json_arg())
        )
        .subcommand(
            Command::new("show")
                .about("Show details for one asset")
                .arg(
                    Arg::new("asset")
                        .help("Rank (1-based) or symbol of the asset")
                        .required(true)
                        .index(1)
                )
                .arg(json_arg())
        )
        .subcommand(
            Command::new("status")
                .about("Show last pull time and remaining cooldown")
                .arg(json_arg())
        )
        .subcommand(
            Command::new("dashboard")
                .about("Refresh if allowed, then show the status line and table")
                .args(sort_args())
        )
}
