//! Configuration schema types
//!
//! This module defines the configuration structure for Geotitres. The whole
//! struct is built by the entry point and passed down; inner components never
//! read the process environment themselves.

use crate::config::SecretString;
use crate::domain::Definition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main Geotitres configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeotitresConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Upstream GraphQL API
    pub api: ApiConfig,

    /// GraphQL query files
    pub queries: QueriesConfig,

    /// Output directory and export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Recurring trigger
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ordered list of exports
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl GeotitresConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.queries.validate()?;
        self.export.validate()?;
        self.schedule.validate()?;
        self.logging.validate()?;

        let mut seen = HashSet::new();
        for definition in &self.definitions {
            definition.validate(&self.export.manifest_name)?;
            if !seen.insert(definition.file_name()) {
                return Err(format!(
                    "Duplicate definition fichier '{}'",
                    definition.file_name()
                ));
            }
        }

        Ok(())
    }

    /// Resolves relative query paths against the configuration file directory
    pub fn resolve_paths(&mut self, base: &Path) {
        self.queries.resolve(base);
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// GraphQL API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint receiving every query
    pub url: String,

    /// Optional bearer token sent with every call
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Optional request timeout in seconds (no timeout when unset)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4000/".to_string(),
            token: None,
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.url.is_empty() {
            return Err("api.url cannot be empty".to_string());
        }

        let parsed =
            url::Url::parse(&self.url).map_err(|e| format!("Invalid api.url '{}': {e}", self.url))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("api.url must start with http:// or https://".to_string());
        }

        if let Some(token) = &self.token {
            if token.expose_secret().is_empty() {
                return Err("api.token cannot be empty when set".to_string());
            }
        }

        if self.timeout_seconds == Some(0) {
            return Err("api.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Paths of the GraphQL query documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueriesConfig {
    /// Query returning `data.titres`
    pub titres: PathBuf,

    /// Query returning `data.types`
    pub types: PathBuf,

    /// Query returning `data.domaines`
    pub domaines: PathBuf,

    /// Query returning `data.statuts`
    pub statuts: PathBuf,
}

impl QueriesConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, path) in self.entries() {
            if path.as_os_str().is_empty() {
                return Err(format!("queries.{name} cannot be empty"));
            }
        }
        Ok(())
    }

    fn resolve(&mut self, base: &Path) {
        for path in [
            &mut self.titres,
            &mut self.types,
            &mut self.domaines,
            &mut self.statuts,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    fn entries(&self) -> [(&'static str, &PathBuf); 4] {
        [
            ("titres", &self.titres),
            ("types", &self.types),
            ("domaines", &self.domaines),
            ("statuts", &self.statuts),
        ]
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory wiped and repopulated on every run
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Name of the manifest file written last
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// Number of definitions processed at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Build the output in a sibling staging directory and swap it in on success
    #[serde(default)]
    pub staging: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            manifest_name: default_manifest_name(),
            concurrency: default_concurrency(),
            staging: false,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.output_dir.parent().is_none() {
            return Err(format!(
                "export.output_dir '{}' cannot be a filesystem root",
                self.output_dir.display()
            ));
        }
        if self.manifest_name.is_empty() || self.manifest_name.contains(['/', '\\']) {
            return Err("export.manifest_name must be a plain file name".to_string());
        }
        if self.concurrency == 0 {
            return Err("export.concurrency must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Recurring trigger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression with seconds (`sec min hour day month weekday`)
    #[serde(default = "default_cron")]
    pub cron: String,

    /// IANA timezone the expression is evaluated in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Run once immediately when the scheduler starts
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            timezone: default_timezone(),
            run_on_start: true,
        }
    }
}

impl ScheduleConfig {
    fn validate(&self) -> Result<(), String> {
        crate::core::schedule::Scheduler::new(&self.cron, &self.timezone)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/geojson")
}

fn default_manifest_name() -> String {
    "infos.json".to_string()
}

fn default_concurrency() -> usize {
    1
}

fn default_cron() -> String {
    "0 0 4 * * Mon-Fri".to_string()
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
