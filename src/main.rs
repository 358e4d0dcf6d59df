mod config;
mod engine;
mod lattice;
mod manager;
mod model;
mod stats;

use crate::config::Config;
use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufWriter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Number of rows.
    #[arg(short = 'm')]
    rows: usize,

    /// Number of columns.
    #[arg(short = 'n')]
    columns: usize,

    /// Initial life points.
    #[arg(short = 'l')]
    life_points: i64,

    /// Certainty of every agent (comma separated, no spaces, row-major).
    #[arg(short = 'c', value_delimiter = ',', required = true, action = clap::ArgAction::Set)]
    certainties: Vec<f64>,

    /// Space horizon.
    #[arg(short = 's')]
    space_horizon: usize,

    /// Time horizon.
    #[arg(short = 't')]
    time_horizon: usize,

    /// Number of rounds.
    #[arg(short = 'r')]
    rounds: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0.0)]
    std_dev_mut: f64,
}

impl From<CLI> for Config {
    fn from(args: CLI) -> Self {
        Self {
            rows: args.rows,
            columns: args.columns,
            life_points: args.life_points,
            certainties: args.certainties,
            space_horizon: args.space_horizon,
            time_horizon: args.time_horizon,
            rounds: args.rounds,
            seed: args.seed,
            std_dev_mut: args.std_dev_mut,
        }
    }
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();

    let cfg = Config::from(args);
    log::info!("{cfg:#?}");

    let mut mgr = Manager::new(cfg).context("failed to construct mgr")?;

    let mut writer = BufWriter::new(std::io::stdout().lock());
    mgr.run(&mut writer).context("failed to run simulation")?;

    Ok(())
}
