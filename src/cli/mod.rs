//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Geotitres using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Geotitres - Mining titles GeoJSON exporter
#[derive(Parser, Debug)]
#[command(name = "geotitres")]
#[command(version, about, long_about = None)]
#[command(author = "Geotitres Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "geotitres.toml", env = "GEOTITRES_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GEOTITRES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one export and exit
    Run(commands::run::RunArgs),

    /// Run on startup, then on the configured cron schedule until stopped
    Schedule(commands::schedule::ScheduleArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
