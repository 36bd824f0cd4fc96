//! CLI module for the User Store API
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server
//! - `check-db`: report connectivity of both store strategies

pub mod check_db;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User Store API - REST backend with mapped and raw SQL persistence
#[derive(Parser)]
#[command(name = "user-store-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Check database connectivity of both store strategies
    CheckDb,
}

/// Load `.env`, configuration and logging shared by every subcommand
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
