//! riffctl - command-line front end for mood riff progress
//!
//! Records riffs and shares, and shows streaks, levels and daily challenges.

use anyhow::Result;
use clap::Parser;
use riff_shared::RiffConfig;
use riffctl::cli::Cli;
use riffctl::{commands, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(commands::exit_code(&e))
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => RiffConfig::load_from(path)?,
        None => RiffConfig::load()?,
    };
    logging::init(&config.log.level);
    commands::run(cli, &config)
}
