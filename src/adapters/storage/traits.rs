//! Output store abstraction
//!
//! The export coordinator only needs to empty a location, put named files in
//! it, and finalise it. Anything able to do that can receive an export.

use crate::domain::Result;
use async_trait::async_trait;

/// Destination of one export run
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Ensure the destination exists and is empty
    ///
    /// # Errors
    ///
    /// Returns an error if existing content cannot be removed or the
    /// destination cannot be created.
    async fn reset(&self) -> Result<()>;

    /// Persist `bytes` under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Make the written content visible to readers
    ///
    /// Called once, after the manifest. Stores writing in place have nothing to do.
    async fn commit(&self) -> Result<()> {
        Ok(())
    }

    /// Human-readable location, for logs
    fn location(&self) -> String;
}
