//! Export orchestration
//!
//! This module provides the core export logic for Geotitres, including:
//! - Export coordination ([`ExportCoordinator`])
//! - The `infos.json` manifest ([`Manifest`])
//! - Summary and reporting ([`ExportSummary`])

pub mod coordinator;
pub mod manifest;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use manifest::Manifest;
pub use summary::ExportSummary;
