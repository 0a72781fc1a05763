//! Reference data used to label title features
//!
//! The API exposes three lookup tables (`types`, `domaines`, `statuts`). Each
//! entry is keyed by its `id`; only the fields used for labelling are kept.

use serde_json::Value;
use std::collections::BTreeMap;

/// One reference entity (a type, a domain or a status)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntity {
    /// Identifier referenced by title records
    pub id: String,

    /// Human-readable label
    pub nom: Option<String>,

    /// Display colour (statuses only, in practice)
    pub couleur: Option<String>,
}

impl MetaEntity {
    /// Read an entity from a raw API object
    ///
    /// Returns `None` when the value is not an object or has no usable `id`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id").and_then(scalar_key)?;

        Some(Self {
            id,
            nom: object.get("nom").and_then(Value::as_str).map(str::to_string),
            couleur: object
                .get("couleur")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Lookup table keyed by entity id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaLookup {
    entries: BTreeMap<String, MetaEntity>,
}

impl MetaLookup {
    /// Build a lookup from the raw `data.<field>` array
    ///
    /// Entries without an id are dropped; a later duplicate id wins.
    pub fn from_values(values: &[Value]) -> Self {
        let entries = values
            .iter()
            .filter_map(MetaEntity::from_value)
            .map(|entity| (entity.id.clone(), entity))
            .collect();
        Self { entries }
    }

    /// Find an entity by id
    pub fn get(&self, id: &str) -> Option<&MetaEntity> {
        self.entries.get(id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three lookups fetched once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBundle {
    pub types: MetaLookup,
    pub domaines: MetaLookup,
    pub statuts: MetaLookup,
}

/// Normalise a string or integer key to a string
pub(crate) fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
