//! Schedule command implementation
//!
//! Runs the export once at startup (unless disabled), then on every cron tick
//! until a shutdown signal arrives.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::GeotitresConfig;
use crate::core::export::ExportCoordinator;
use crate::core::schedule::Scheduler;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the schedule command
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Do not run an export at startup, wait for the first tick
    #[arg(long)]
    pub skip_initial_run: bool,
}

impl ScheduleArgs {
    /// Execute the schedule command
    ///
    /// Returns once `shutdown_signal` turns true. A run already in progress
    /// is allowed to finish first.
    pub async fn execute(
        &self,
        config: GeotitresConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let scheduler = match Scheduler::new(&config.schedule.cron, &config.schedule.timezone) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Invalid schedule");
                eprintln!("Invalid schedule: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let coordinator = match ExportCoordinator::new(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let run_on_start = config.schedule.run_on_start && !self.skip_initial_run;

        println!(
            "⏰ Scheduled exports: '{}' ({})",
            scheduler.expression(),
            scheduler.timezone()
        );

        let coordinator = &coordinator;
        scheduler
            .run(run_on_start, shutdown_signal, move || async move {
                coordinator.run_once().await;
            })
            .await;

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_schedule_is_config_error() {
        let mut config: GeotitresConfig = toml::from_str(
            r#"
[api]
url = "http://localhost/graphql"

[queries]
titres = "titres.gql"
types = "types.gql"
domaines = "domaines.gql"
statuts = "statuts.gql"
"#,
        )
        .unwrap();
        config.schedule.timezone = "Mars/Olympus".to_string();
        let (_tx, rx) = watch::channel(false);

        let args = ScheduleArgs {
            skip_initial_run: true,
        };

        assert_eq!(args.execute(config, rx).await.unwrap(), EXIT_CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_stops_on_shutdown() {
        let config: GeotitresConfig = toml::from_str(
            r#"
[api]
url = "http://localhost/graphql"

[queries]
titres = "titres.gql"
types = "types.gql"
domaines = "domaines.gql"
statuts = "statuts.gql"
"#,
        )
        .unwrap();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let args = ScheduleArgs {
            skip_initial_run: false,
        };

        assert_eq!(args.execute(config, rx).await.unwrap(), EXIT_SUCCESS);
    }
}
