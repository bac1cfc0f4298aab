use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridnav_core::{Connectivity, Mobility, PathRequest, Policy};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gridnav_cli::commands;
use gridnav_cli::scenario::{parse_tile, Scenario};

#[derive(Parser, Debug)]
#[command(name = "gridnav", version, about = "Query paths on a tile grid scenario")]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one path query and print the outcome as JSON
    Find {
        #[arg(long, value_name = "PATH")]
        scenario: PathBuf,
        #[arg(long, value_name = "X,Y")]
        from: String,
        #[arg(long, value_name = "X,Y")]
        to: String,
        #[arg(long, default_value = "perfect_max_try_player")]
        policy: Policy,
        #[arg(long, default_value = "8")]
        connectivity: Connectivity,
        #[arg(long, default_value = "ground")]
        mobility: Mobility,
        /// Search config JSON; GRIDNAV_* env vars are used when absent
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Include an ASCII picture of the grid and path
        #[arg(long)]
        render: bool,
    },
    /// Print plane counts for a scenario
    Stats {
        #[arg(long, value_name = "PATH")]
        scenario: PathBuf,
    },
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_ansi(false);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);
    info!(version = gridnav_core::version(), "gridnav starting");

    let out = match args.command {
        Command::Find { scenario, from, to, policy, connectivity, mobility, config, render } => {
            let sc = Scenario::load(&scenario)?;
            let config = commands::load_config(config.as_deref())?;
            let request = PathRequest::new(parse_tile(&from)?, parse_tile(&to)?, policy, connectivity).with_mobility(mobility);
            let report = commands::find(&sc, request, config, render)?;
            if let Some(pic) = &report.picture {
                eprintln!("{pic}");
            }
            serde_json::to_string_pretty(&report).context("encoding report")?
        }
        Command::Stats { scenario } => {
            let sc = Scenario::load(&scenario)?;
            serde_json::to_string_pretty(&commands::stats(&sc)?).context("encoding report")?
        }
    };
    println!("{out}");
    Ok(())
}
