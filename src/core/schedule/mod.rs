//! Recurring trigger for export runs
//!
//! Cron expressions use the 6-field form of the `cron` crate
//! (`sec min hour day month weekday`) and are evaluated in an IANA timezone,
//! so "04:00 Europe/Paris" stays at 04:00 local time across DST changes.
//!
//! Jobs run inline in the scheduler loop: a tick that falls due while a run
//! is in progress is picked up after it finishes, never concurrently.

use crate::domain::{GeotitresError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use std::future::Future;
use std::str::FromStr;
use tokio::sync::watch;

/// Cron schedule bound to a timezone
#[derive(Debug, Clone)]
pub struct Scheduler {
    expression: String,
    schedule: Schedule,
    timezone: Tz,
}

impl Scheduler {
    /// Parse `expression` and `timezone`
    ///
    /// # Errors
    ///
    /// Returns [`GeotitresError::Schedule`] for an invalid expression or an
    /// unknown timezone.
    ///
    /// # Example
    ///
    /// ```
    /// use geotitres::core::schedule::Scheduler;
    ///
    /// let scheduler = Scheduler::new("0 0 4 * * Mon-Fri", "Europe/Paris").unwrap();
    /// assert!(scheduler.next_after(chrono::Utc::now()).is_some());
    /// ```
    pub fn new(expression: &str, timezone: &str) -> Result<Self> {
        let schedule = Schedule::from_str(expression).map_err(|e| {
            GeotitresError::Schedule(format!("Invalid cron expression '{expression}': {e}"))
        })?;
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| GeotitresError::Schedule(format!("Invalid timezone: {timezone}")))?;

        Ok(Self {
            expression: expression.to_string(),
            schedule,
            timezone,
        })
    }

    /// The expression this scheduler was built from
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Timezone the expression is evaluated in
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// First tick strictly after `after`
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&after.with_timezone(&self.timezone))
            .next()
            .map(|tick| tick.with_timezone(&Utc))
    }

    /// Run `job` on every tick until `shutdown` turns true
    ///
    /// With `run_on_start`, the job also runs once immediately. The loop ends
    /// when shutdown is requested, when the sender is dropped, or when the
    /// expression has no future tick.
    pub async fn run<F, Fut>(&self, run_on_start: bool, mut shutdown: watch::Receiver<bool>, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        tracing::info!(
            cron = %self.expression,
            timezone = %self.timezone,
            run_on_start,
            "Scheduler started"
        );

        if run_on_start && !*shutdown.borrow() {
            job().await;
        }

        loop {
            if *shutdown.borrow() {
                break;
            }

            let now = Utc::now();
            let Some(next) = self.next_after(now) else {
                tracing::warn!(cron = %self.expression, "Schedule has no upcoming tick");
                break;
            };
            let wait = (next - now).to_std().unwrap_or_default();

            tracing::info!(
                next_run = %next.with_timezone(&self.timezone),
                wait_secs = wait.as_secs(),
                "Waiting for next scheduled run"
            );

            tokio::select! {
                _ = tokio::time::sleep(wait) => job().await,
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Scheduler stopped");
    }
}
