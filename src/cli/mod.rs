// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v1.2
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! CLI module for the breathline binary. Exports argument parser and main entry.

pub mod args;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::ArgMatches;
use serde::Serialize;

use crate::cli::args::build_cli;
use crate::config::DashboardConfig;
use crate::dashboard::server::DashboardServer;
use crate::dashboard::Dashboard;

/// Entry point for the CLI. Loads config, builds the dashboard, runs one subcommand.
pub fn run() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    run_matches(&matches)
}

pub fn run_matches(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let cfg = DashboardConfig::load(config_path).context("loading configuration")?;
    let dashboard = Dashboard::from_config(&cfg);

    match matches.subcommand() {
        Some(("serve", _)) => {
            let server = DashboardServer::bind(&cfg.listen)
                .with_context(|| format!("starting HTTP server on {}", cfg.listen))?;
            server.run(Arc::new(dashboard), cfg.http_workers);
        }
        Some(("latest", _)) => match dashboard.latest_telemetry()? {
            Some(record) => print_json(&record)?,
            None => println!("no telemetry yet ({})", cfg.telemetry_path.display()),
        },
        Some(("recent", sub)) => {
            let window = window_arg(sub, &dashboard);
            print_json(&dashboard.recent_telemetry(window)?)?;
        }
        Some(("series", sub)) => {
            let channel = sub
                .get_one::<String>("channel")
                .context("series needs a channel")?;
            let window = window_arg(sub, &dashboard);
            print_json(&dashboard.telemetry_series(channel, window)?)?;
        }
        Some(("proposals", _)) => print_json(&dashboard.list_proposals()?)?,
        Some(("summary", _)) => print_json(&dashboard.contract_summary()?)?,
        Some(("tally", _)) => print_json(&dashboard.tone_tally()?)?,
        Some(("state", _)) => print_json(&dashboard.contract_state()?)?,
        Some(("expired", _)) => print_json(&dashboard.expired_offerings()?)?,
        Some(("block", _)) => println!("{}", dashboard.current_block()?),
        Some((other, _)) => bail!("unknown subcommand {other}"),
        None => bail!("no subcommand given"),
    }
    Ok(())
}

fn window_arg(sub: &ArgMatches, dashboard: &Dashboard) -> usize {
    sub.get_one::<usize>("window")
        .copied()
        .unwrap_or(dashboard.default_window())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("rendering JSON output")?
    );
    Ok(())
}
