//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GeotitresConfig;
use super::secret::secret_string;
use crate::domain::errors::GeotitresError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GeotitresConfig
/// 4. Applies environment variable overrides (GEOTITRES_* prefix)
/// 5. Resolves relative query paths against the file's directory
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns [`GeotitresError::Configuration`] if any step fails.
///
/// # Examples
///
/// ```no_run
/// use geotitres::config::loader::load_config;
///
/// let config = load_config("geotitres.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GeotitresConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GeotitresError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GeotitresError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GeotitresConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    config.resolve_paths(&base);

    config.validate().map_err(|e| {
        GeotitresError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GeotitresError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GeotitresError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GEOTITRES_* prefix
///
/// Variables follow the pattern GEOTITRES_<SECTION>_<KEY>, for example
/// GEOTITRES_API_URL or GEOTITRES_EXPORT_OUTPUT_DIR.
fn apply_env_overrides(config: &mut GeotitresConfig) {
    if let Ok(val) = std::env::var("GEOTITRES_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("GEOTITRES_API_URL") {
        config.api.url = val;
    }
    if let Ok(val) = std::env::var("GEOTITRES_API_TOKEN") {
        config.api.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("GEOTITRES_API_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.api.timeout_seconds = Some(seconds);
        }
    }

    if let Ok(val) = std::env::var("GEOTITRES_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("GEOTITRES_EXPORT_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.export.concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("GEOTITRES_EXPORT_STAGING") {
        config.export.staging = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("GEOTITRES_SCHEDULE_CRON") {
        config.schedule.cron = val;
    }
    if let Ok(val) = std::env::var("GEOTITRES_SCHEDULE_TIMEZONE") {
        config.schedule.timezone = val;
    }
    if let Ok(val) = std::env::var("GEOTITRES_SCHEDULE_RUN_ON_START") {
        config.schedule.run_on_start = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("GEOTITRES_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GEOTITRES_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
