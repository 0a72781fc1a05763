//! The `infos.json` manifest
//!
//! One entry per written collection, in definition order. Definitions that
//! produced nothing leave an empty slot which is dropped on compaction.

use crate::domain::Result;
use geojson::JsonObject;

/// Ordered list of the generated collections' properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: Vec<JsonObject>,
}

impl Manifest {
    /// Compact per-definition slots, keeping definition order
    pub fn from_slots(slots: impl IntoIterator<Item = Option<JsonObject>>) -> Self {
        Self {
            entries: slots.into_iter().flatten().collect(),
        }
    }

    /// Entries in definition order
    pub fn entries(&self) -> &[JsonObject] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no collection was written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array, 2-space indented
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.entries)?)
    }
}
