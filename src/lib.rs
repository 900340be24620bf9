//! stechuhr library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let user_id = cli.user.unwrap_or(cfg.default_user);

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Start => cli::commands::lifecycle::handle_start(cfg, user_id),
        Commands::Pause { .. } => cli::commands::lifecycle::handle_pause(&cli.command, cfg, user_id),
        Commands::End { .. } => cli::commands::lifecycle::handle_end(&cli.command, cfg, user_id),
        Commands::Status { .. } => {
            cli::commands::lifecycle::handle_status(&cli.command, cfg, user_id)
        }
        Commands::Report { .. } => cli::commands::report::handle_report(&cli.command, cfg, user_id),
        Commands::Vacation { .. } => {
            cli::commands::report::handle_vacation(&cli.command, cfg, user_id)
        }
        Commands::Absence { action } => cli::commands::absence::handle(action, cfg, user_id),
        Commands::User { action } => cli::commands::user::handle(action, cfg, user_id),
        Commands::Segment { action } => cli::commands::segment::handle(action, cfg, user_id),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once, then apply the command-line DB override
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
