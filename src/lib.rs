//! gymdesk library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (membership engine, persistence, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Plan(cmd) => commands::plan::handle(cmd, cfg),
        Commands::Client(cmd) => commands::client::handle(cmd, cfg),
        Commands::Checkin { national_id } => commands::checkin::handle_checkin(national_id, cfg),
        Commands::Checkout { national_id } => commands::checkin::handle_checkout(national_id, cfg),
        Commands::Renew {
            national_id,
            plan,
            pay,
        } => commands::renew::handle(national_id, plan, pay.as_deref(), cfg),
        Commands::Expirations { limit } => commands::expirations::handle(*limit, cfg),
        Commands::Report {
            range,
            export,
            format,
            force,
        } => commands::report::handle(range.as_deref(), export.as_deref(), *format, *force, cfg),
        Commands::Summary => commands::summary::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; `--db` wins over the configured database
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(Some(custom_db.as_str()))
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
