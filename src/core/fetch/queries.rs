//! GraphQL query documents
//!
//! Queries live in `.gql` files next to the configuration and are read at the
//! start of every run, so edits are picked up without a restart.

use crate::config::QueriesConfig;
use crate::domain::{GeotitresError, Result};
use std::path::Path;

/// The four query documents used by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queries {
    pub titres: String,
    pub types: String,
    pub domaines: String,
    pub statuts: String,
}

impl Queries {
    /// Read every query file
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the file that could not be read.
    pub async fn load(config: &QueriesConfig) -> Result<Self> {
        Ok(Self {
            titres: read_query(&config.titres).await?,
            types: read_query(&config.types).await?,
            domaines: read_query(&config.domaines).await?,
            statuts: read_query(&config.statuts).await?,
        })
    }
}

async fn read_query(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        GeotitresError::Io(format!("Failed to read query {}: {e}", path.display()))
    })
}
