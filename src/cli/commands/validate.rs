//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Geotitres configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::schedule::Scheduler;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Endpoint: {}", config.api.url);
        println!(
            "  API Token: {}",
            if config.api.token.is_some() { "set" } else { "none" }
        );
        println!("  Output Directory: {}", config.export.output_dir.display());
        println!("  Manifest: {}", config.export.manifest_name);
        println!("  Concurrency: {}", config.export.concurrency);
        println!("  Staging: {}", config.export.staging);
        println!(
            "  Schedule: '{}' ({})",
            config.schedule.cron, config.schedule.timezone
        );

        if let Ok(scheduler) = Scheduler::new(&config.schedule.cron, &config.schedule.timezone) {
            if let Some(next) = scheduler.next_after(chrono::Utc::now()) {
                println!(
                    "  Next Run: {}",
                    next.with_timezone(&scheduler.timezone())
                );
            }
        }

        println!("  Definitions: {}", config.definitions.len());
        for definition in &config.definitions {
            println!("    - {} -> {}", definition.nom, definition.file_name());
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
