mod commands;
mod config;
mod logger;
mod store;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::SetLoggerError;
use thiserror::Error;

use crate::commands::Command;
use crate::config::{Config, ConfigError};
use crate::store::JsonStore;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The path of the TOML config file.
    #[arg(short, long, default_value = "field-control.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_file(&args.config)?.with_environment();
    logger::init(config.loglevel)?;

    log::debug!("Using config: {:?}", config);

    let mut store = JsonStore::open(&config.store)?;
    args.command.run(&config, &mut store)?;

    if args.command.is_mutating() {
        store.save()?;
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Playoff(#[from] field_control_playoff::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Logger(#[from] SetLoggerError),
    #[error("match {0} has not been revealed yet")]
    MatchHidden(u32),
    #[error("an alliance needs at least 3 teams")]
    InvalidLineUp,
}

pub type Result<T> = std::result::Result<T, Error>;
