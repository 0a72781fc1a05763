//! Run command implementation
//!
//! This module implements the `run` command: a single export, then exit.

use super::{EXIT_CONFIG_ERROR, EXIT_RUN_FAILED, EXIT_SUCCESS};
use crate::config::GeotitresConfig;
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the output directory from the configuration
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, mut config: GeotitresConfig) -> anyhow::Result<i32> {
        if let Some(ref output_dir) = self.output_dir {
            tracing::debug!(output_dir = %output_dir, "Output directory overridden from CLI");
            config.export.output_dir = output_dir.into();

            // The override is wiped on reset, check it like the file value
            if let Err(e) = config.validate() {
                tracing::error!(error = %e, "Invalid output directory override");
                eprintln!("❌ Invalid --output-dir: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        }

        let coordinator = match ExportCoordinator::new(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        match coordinator.run_once().await {
            Some(summary) => {
                print_summary(&summary);
                Ok(EXIT_SUCCESS)
            }
            None => {
                eprintln!("❌ Export failed, see logs for details");
                Ok(EXIT_RUN_FAILED)
            }
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Definitions: {}", summary.total_definitions);
    println!("  Files written: {}", summary.files_written);
    println!("  Features: {}", summary.total_features);
    if !summary.skipped_definitions.is_empty() {
        println!("  Skipped (no titles): {}", summary.skipped_definitions.join(", "));
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
    println!("✅ {} files generated", summary.files_written);
}
