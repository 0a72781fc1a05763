//! Core business logic for Geotitres.
//!
//! # Modules
//!
//! - [`fetch`] - Metadata and title fetchers
//! - [`transform`] - Title records to GeoJSON FeatureCollections
//! - [`export`] - Export orchestration, manifest and summary
//! - [`schedule`] - Cron trigger for recurring runs
//!
//! # Export Workflow
//!
//! 1. **Load queries**: read the `.gql` documents
//! 2. **Reset**: wipe and recreate the output directory
//! 3. **Metadata**: fetch types, domains and statuses
//! 4. **Per definition**: fetch titles, transform, write (or skip when empty)
//! 5. **Manifest**: write `infos.json`
//!
//! # Example
//!
//! ```rust,no_run
//! use geotitres::config::load_config;
//! use geotitres::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("geotitres.toml")?;
//! let coordinator = ExportCoordinator::new(&config)?;
//!
//! let summary = coordinator.execute_export().await?;
//! println!("{} files generated", summary.files_written);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fetch;
pub mod schedule;
pub mod transform;
