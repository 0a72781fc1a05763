//! CLI command implementations
//!
//! Commands return the process exit code: 0 on success, 1 for a failed
//! export, 2 for a configuration error.

pub mod run;
pub mod schedule;
pub mod validate;

/// Exit code for a successful command
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a failed export run
pub const EXIT_RUN_FAILED: i32 = 1;

/// Exit code for an invalid or unreadable configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;
