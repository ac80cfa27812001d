//! rosterctl library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
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
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami | Commands::Passwd { .. } => {
            cli::commands::login::handle(&cli.command, cfg)
        }
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg),
        Commands::Roster { .. } => cli::commands::roster::handle(&cli.command, cfg),
        Commands::Shift { .. } => cli::commands::shift::handle(&cli.command, cfg),
        Commands::Generate { .. } => cli::commands::generate::handle(&cli.command, cfg),
        Commands::Exchange { .. } => cli::commands::exchange::handle(&cli.command, cfg),
        Commands::Event { .. } => cli::commands::event::handle(&cli.command, cfg),
        Commands::Order { .. } => cli::commands::order::handle(&cli.command, cfg),
        Commands::Stats => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once
    let mut cfg = Config::load();

    // Apply a database override from the command line, if any
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
