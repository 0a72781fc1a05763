// Geotitres - Mining titles GeoJSON exporter
// Copyright (c) 2025 Geotitres Contributors
// Licensed under the MIT License

//! # Geotitres - Mining titles to GeoJSON
//!
//! Geotitres is a batch job that queries a GraphQL API for mining titles
//! (`titres`) and their reference data (`types`, `domaines`, `statuts`), and
//! writes one GeoJSON `FeatureCollection` file per configured definition plus
//! an `infos.json` manifest listing the files produced.
//!
//! ## Overview
//!
//! Each run:
//! - **Resets** the output directory (wipe + recreate)
//! - **Fetches** the metadata bundle once
//! - **Transforms** the titles of every definition into features, resolving
//!   type, domain and status labels from the metadata
//! - **Writes** one file per non-empty definition and the manifest
//!
//! Runs happen once on startup and then on a cron schedule
//! (04:00 Europe/Paris, Monday to Friday, by default).
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fetch, transform, export, schedule)
//! - [`adapters`] - External integrations (GraphQL API, output directory)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geotitres::config::load_config;
//! use geotitres::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("geotitres.toml")?;
//!     let coordinator = ExportCoordinator::new(&config)?;
//!
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("{} files generated", summary.files_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible library calls return [`domain::Result`], backed by
//! [`domain::GeotitresError`]. A failed run is logged once by
//! [`core::export::ExportCoordinator::run_once`] and never stops the schedule.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
