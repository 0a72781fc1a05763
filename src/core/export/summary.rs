//! Export summary and reporting
//!
//! This module defines the structure describing what one export run produced.

use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Number of configured definitions
    pub total_definitions: usize,

    /// Number of collection files written
    pub files_written: usize,

    /// Definitions whose fetch returned no titles
    pub skipped_definitions: Vec<String>,

    /// Features written across all files
    pub total_features: usize,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(total_definitions: usize) -> Self {
        Self {
            total_definitions,
            files_written: 0,
            skipped_definitions: Vec::new(),
            total_features: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written collection
    pub fn add_file(&mut self, features: usize) {
        self.files_written += 1;
        self.total_features += features;
    }

    /// Record a definition skipped for lack of titles
    pub fn add_skipped(&mut self, definition: impl Into<String>) {
        self.skipped_definitions.push(definition.into());
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_definitions = self.total_definitions,
            files_written = self.files_written,
            skipped = self.skipped_definitions.len(),
            total_features = self.total_features,
            duration_ms = self.duration.as_millis() as u64,
            "{} files generated",
            self.files_written
        );

        if !self.skipped_definitions.is_empty() {
            tracing::debug!(
                definitions = ?self.skipped_definitions,
                "Definitions without titles were skipped"
            );
        }
    }
}
