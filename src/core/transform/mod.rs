//! Data transformation logic
//!
//! Converts one definition's title records into a GeoJSON FeatureCollection.
//! The transformation is pure: the same inputs always give the same
//! collection, and therefore the same serialized bytes.
//!
//! The collection carries a non-standard top-level `properties` member
//! describing itself (`fichier`, `nom`, `description`, `total`). The export
//! coordinator names the output file from `fichier` and copies the whole
//! object into the manifest.

pub mod feature;

pub use feature::{title_to_feature, title_properties};

use crate::domain::{Definition, MetadataBundle};
use geojson::{FeatureCollection, JsonObject};
use serde_json::Value;

/// Name of the collection-level member describing the collection
pub const COLLECTION_PROPERTIES: &str = "properties";

/// Build the collection for one definition
///
/// # Examples
///
/// ```
/// use geotitres::core::transform::{build_feature_collection, collection_properties};
/// use geotitres::domain::{Definition, MetadataBundle};
/// use serde_json::json;
///
/// let definition = Definition::new("Titres valides", "titres-val");
/// let titres = vec![json!({"id": "t1", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}})];
///
/// let collection = build_feature_collection(&definition, &titres, &MetadataBundle::default());
///
/// assert_eq!(collection.features.len(), 1);
/// let properties = collection_properties(&collection).unwrap();
/// assert_eq!(properties["fichier"], "titres-val.geojson");
/// assert_eq!(properties["total"], 1);
/// ```
pub fn build_feature_collection(
    definition: &Definition,
    titres: &[Value],
    metadata: &MetadataBundle,
) -> FeatureCollection {
    let features: Vec<_> = titres
        .iter()
        .map(|record| title_to_feature(record, metadata))
        .collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        COLLECTION_PROPERTIES.to_string(),
        Value::Object(definition_properties(definition, features.len())),
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

/// Descriptive block written at collection level and into the manifest
pub fn definition_properties(definition: &Definition, total: usize) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("fichier".to_string(), Value::String(definition.file_name()));
    properties.insert("nom".to_string(), Value::String(definition.nom.clone()));
    if let Some(description) = &definition.description {
        properties.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }
    properties.insert("total".to_string(), Value::from(total));
    properties
}

/// The collection-level `properties` member, if present
pub fn collection_properties(collection: &FeatureCollection) -> Option<&JsonObject> {
    collection
        .foreign_members
        .as_ref()?
        .get(COLLECTION_PROPERTIES)?
        .as_object()
}

/// The `fichier` the collection should be written to
pub fn collection_file_name(collection: &FeatureCollection) -> Option<&str> {
    collection_properties(collection)?
        .get("fichier")?
        .as_str()
}
