//! Domain error types
//!
//! This module defines the error hierarchy for Geotitres. Errors are domain-specific
//! and don't expose third-party types.

use thiserror::Error;

/// Main Geotitres error type
///
/// This is the primary error type used throughout the application.
/// Every stage of an export run propagates one of these to the run boundary.
#[derive(Debug, Error)]
pub enum GeotitresError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream GraphQL API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Output directory errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Scheduling errors (invalid cron expression, unknown timezone)
    #[error("Schedule error: {0}")]
    Schedule(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// GraphQL API errors
///
/// Errors that occur when calling the upstream API. A response that simply
/// lacks the expected `data.<field>` is not an error; see
/// [`FetchOutcome`](crate::core::fetch::FetchOutcome).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the API
    #[error("Failed to connect to API: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Body is not valid JSON
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for GeotitresError {
    fn from(err: std::io::Error) -> Self {
        GeotitresError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GeotitresError {
    fn from(err: serde_json::Error) -> Self {
        GeotitresError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for GeotitresError {
    fn from(err: toml::de::Error) -> Self {
        GeotitresError::Configuration(format!("TOML parse error: {err}"))
    }
}
