// CLASSIFICATION: COMMUNITY
// Filename: args.rs v1.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

use clap::{value_parser, Arg, Command};

/// Builds and returns the CLI argument parser for the breathline binary.
pub fn build_cli() -> Command {
    Command::new("breathline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Breathline telemetry and cooperative ledger dashboard")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .global(true)
                .required(false),
        )
        .subcommand(Command::new("serve").about("Serve the JSON API over HTTP"))
        .subcommand(Command::new("latest").about("Print the newest telemetry record"))
        .subcommand(
            Command::new("recent")
                .about("Print the recent telemetry window, oldest first")
                .arg(window_arg()),
        )
        .subcommand(
            Command::new("series")
                .about("Print one channel over the recent window, for charting")
                .arg(
                    Arg::new("channel")
                        .value_name("CHANNEL")
                        .help("Channel name, e.g. ambient_temp")
                        .required(true),
                )
                .arg(window_arg()),
        )
        .subcommand(Command::new("proposals").about("List proposals with derived status"))
        .subcommand(Command::new("summary").about("Show contract steward, quorum and balance"))
        .subcommand(Command::new("tally").about("Tone tally over active proposals"))
        .subcommand(Command::new("state").about("Active offering counters"))
        .subcommand(Command::new("expired").about("Expired, unexecuted proposals"))
        .subcommand(Command::new("block").about("Current ledger block number"))
}

fn window_arg() -> Arg {
    Arg::new("window")
        .short('w')
        .long("window")
        .value_name("N")
        .help("Number of records (defaults to recent_window from config)")
        .value_parser(value_parser!(usize))
}
