mod augment_cmd;
mod cli;
mod config;
mod estimate_cmd;
mod information_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::KnnlikeConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = KnnlikeConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Augment(args) => augment_cmd::run(args, &config),
        Command::BuildIndex(args) => estimate_cmd::build_index(args, &config),
        Command::Estimate(args) => estimate_cmd::run(args, &config),
        Command::Information(args) => information_cmd::run(args),
    }
}
