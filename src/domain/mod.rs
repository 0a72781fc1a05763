//! Domain models and types for Geotitres.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Export definitions** ([`Definition`])
//! - **Reference data** ([`MetadataBundle`], [`MetaLookup`], [`MetaEntity`])
//! - **Error types** ([`GeotitresError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! Title records themselves stay as raw `serde_json::Value` objects: the API
//! returns heterogeneous shapes and the transformer reads them defensively.

pub mod definition;
pub mod errors;
pub mod metadata;
pub mod result;

pub use definition::{Definition, GEOJSON_EXTENSION};
pub use errors::{ApiError, GeotitresError};
pub use metadata::{MetaEntity, MetaLookup, MetadataBundle};
pub use result::Result;
