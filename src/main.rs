// Geotitres - Mining titles GeoJSON exporter
// Copyright (c) 2025 Geotitres Contributors
// Licensed under the MIT License

use clap::Parser;
use geotitres::cli::commands::{EXIT_CONFIG_ERROR, EXIT_RUN_FAILED, EXIT_SUCCESS};
use geotitres::cli::{Cli, Commands};
use geotitres::config::{load_config, LoggingConfig};
use geotitres::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config reports its own loading errors, console logging only
    if let Commands::ValidateConfig(args) = &cli.command {
        let log_level = cli.log_level.as_deref().unwrap_or("info");
        let _guard = match init_logging(log_level, &LoggingConfig::default()) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {e}");
                process::exit(EXIT_CONFIG_ERROR);
            }
        };
        let exit_code = args.execute(&cli.config).await.unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        });
        process::exit(exit_code);
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration file {}", cli.config);
            eprintln!("   Error: {e}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());
    let guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Geotitres - Mining titles GeoJSON exporter"
    );

    let result = match cli.command {
        Commands::Run(args) => args.execute(config).await,
        Commands::Schedule(args) => {
            // Create shutdown signal channel for graceful shutdown
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(wait_for_shutdown(shutdown_tx));
            args.execute(config, shutdown_rx).await
        }
        Commands::ValidateConfig(_) => Ok(EXIT_SUCCESS),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_RUN_FAILED
        }
    };

    // process::exit skips destructors, flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Flip the shutdown flag on Ctrl+C or SIGTERM
async fn wait_for_shutdown(shutdown_tx: watch::Sender<bool>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, Ctrl+C only");
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received SIGINT (Ctrl+C), shutting down...");
                    let _ = shutdown_tx.send(true);
                }
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT (Ctrl+C), shutting down...");
            }
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM, shutting down...");
            }
        }
        println!("\n⚠️  Shutdown signal received, finishing current run...");
        let _ = shutdown_tx.send(true);
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        } else {
            tracing::info!("Received SIGINT (Ctrl+C), shutting down...");
            println!("\n⚠️  Shutdown signal received, finishing current run...");
            let _ = shutdown_tx.send(true);
        }
    }
}
