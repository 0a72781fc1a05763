//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output
//! - optional JSON file output with rotation
//! - level from configuration, overridable with `RUST_LOG`
//!
//! A successful run logs one `"<n> files generated"` line; a failed run logs
//! the full error once, at the run boundary.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
