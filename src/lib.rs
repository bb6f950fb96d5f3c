//! rzinesync library root.
//! Exposes the CLI parser, the high-level run() function, the LST codec and
//! the delta engine.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod lst;
pub mod models;
pub mod remote;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Check { .. } => cli::commands::check::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Cell { .. } => cli::commands::cell::handle(&cli.command, cfg),
        Commands::Delta { .. } => cli::commands::delta::handle(cli, cfg),
        Commands::Upload { .. } => cli::commands::upload::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line override of the remote root
    if let Some(remote) = &cli.remote {
        cfg.remote_root = remote.clone();
    }
    cfg.expand_paths();

    dispatch(&cli, &cfg)
}
