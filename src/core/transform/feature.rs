//! Title record to GeoJSON feature
//!
//! Records come back from the API in slightly different shapes depending on
//! the query, so every field is read defensively from the raw JSON.

use crate::domain::metadata::scalar_key;
use crate::domain::{MetaLookup, MetadataBundle};
use geojson::feature::Id;
use geojson::{Feature, Geometry, JsonObject};
use serde_json::Value;

/// Property holding the resolved type label
pub const TYPE_LABEL: &str = "typeNom";
/// Property holding the resolved domain label
pub const DOMAINE_LABEL: &str = "domaineNom";
/// Property holding the resolved status label
pub const STATUT_LABEL: &str = "statutNom";
/// Property holding the resolved status colour
pub const STATUT_COLOUR: &str = "statutCouleur";

/// Record keys that may carry the title geometry
const GEOMETRY_KEYS: [&str; 2] = ["geometry", "geojsonMultiPolygon"];

/// Build one feature from a raw title record
///
/// Geometry is `null` when the record has none or it does not parse; the
/// feature is still emitted so counts match the input.
pub fn title_to_feature(record: &Value, metadata: &MetadataBundle) -> Feature {
    let geometry = extract_geometry(record);
    if geometry.is_none() {
        tracing::warn!(
            titre = record.get("id").map(|id| id.to_string()).unwrap_or_default(),
            "Title has no usable geometry"
        );
    }

    Feature {
        bbox: None,
        geometry,
        id: feature_id(record),
        properties: Some(title_properties(record, metadata)),
        foreign_members: None,
    }
}

/// Scalar fields of the record merged with labels resolved from `metadata`
pub fn title_properties(record: &Value, metadata: &MetadataBundle) -> JsonObject {
    let mut properties = JsonObject::new();

    if let Some(object) = record.as_object() {
        for (key, value) in object {
            if GEOMETRY_KEYS.contains(&key.as_str()) {
                continue;
            }
            if matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
                properties.insert(key.clone(), value.clone());
            }
        }
    }

    if let Some(entity) = resolve(record, "type", &metadata.types) {
        insert_label(&mut properties, TYPE_LABEL, entity.nom.as_deref());
    }
    if let Some(entity) = resolve(record, "domaine", &metadata.domaines) {
        insert_label(&mut properties, DOMAINE_LABEL, entity.nom.as_deref());
    }
    if let Some(entity) = resolve(record, "statut", &metadata.statuts) {
        insert_label(&mut properties, STATUT_LABEL, entity.nom.as_deref());
        insert_label(&mut properties, STATUT_COLOUR, entity.couleur.as_deref());
    }

    properties
}

/// Foreign key for `relation`: `<relation>Id`, or `<relation>.id`
pub fn foreign_key(record: &Value, relation: &str) -> Option<String> {
    record
        .get(format!("{relation}Id"))
        .and_then(scalar_key)
        .or_else(|| {
            record
                .get(relation)
                .and_then(|nested| nested.get("id"))
                .and_then(scalar_key)
        })
}

fn resolve<'a>(
    record: &Value,
    relation: &str,
    lookup: &'a MetaLookup,
) -> Option<&'a crate::domain::MetaEntity> {
    foreign_key(record, relation).and_then(|key| lookup.get(&key))
}

fn insert_label(properties: &mut JsonObject, key: &str, label: Option<&str>) {
    if let Some(label) = label {
        properties.insert(key.to_string(), Value::String(label.to_string()));
    }
}

fn feature_id(record: &Value) -> Option<Id> {
    match record.get("id")? {
        Value::String(s) => Some(Id::String(s.clone())),
        Value::Number(n) => Some(Id::Number(n.clone())),
        _ => None,
    }
}

fn extract_geometry(record: &Value) -> Option<Geometry> {
    let candidate = match record.get("geometry") {
        Some(geometry) if !geometry.is_null() => geometry,
        _ => {
            let wrapped = record.get("geojsonMultiPolygon")?;
            wrapped.get("geometry").unwrap_or(wrapped)
        }
    };

    if candidate.is_null() {
        return None;
    }

    match Geometry::from_json_value(candidate.clone()) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            tracing::debug!(error = %e, "Geometry does not parse as GeoJSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetaLookup;
    use geojson::Value as GeoValue;
    use serde_json::json;
    use test_case::test_case;

    fn metadata() -> MetadataBundle {
        MetadataBundle {
            types: MetaLookup::from_values(&[json!({"id": "axm", "nom": "autorisation d'exploitation"})]),
            domaines: MetaLookup::from_values(&[json!({"id": "m", "nom": "minéraux et métaux"})]),
            statuts: MetaLookup::from_values(&[
                json!({"id": "val", "nom": "valide", "couleur": "success"}),
            ]),
        }
    }

    fn polygon() -> Value {
        json!({
            "type": "MultiPolygon",
            "coordinates": [[[[-52.5, 4.1], [-52.4, 4.1], [-52.4, 4.2], [-52.5, 4.1]]]]
        })
    }

    #[test]
    fn test_flat_record() {
        let record = json!({
            "id": "m-axm-crique-2018",
            "nom": "Crique",
            "typeId": "axm",
            "domaineId": "m",
            "statutId": "val",
            "surface": 1.25,
            "geometry": polygon()
        });

        let feature = title_to_feature(&record, &metadata());

        assert_eq!(feature.id, Some(Id::String("m-axm-crique-2018".to_string())));
        assert!(matches!(
            feature.geometry.as_ref().map(|g| &g.value),
            Some(GeoValue::MultiPolygon(_))
        ));

        let properties = feature.properties.unwrap();
        assert_eq!(properties["nom"], "Crique");
        assert_eq!(properties["surface"], 1.25);
        assert_eq!(properties[TYPE_LABEL], "autorisation d'exploitation");
        assert_eq!(properties[DOMAINE_LABEL], "minéraux et métaux");
        assert_eq!(properties[STATUT_LABEL], "valide");
        assert_eq!(properties[STATUT_COLOUR], "success");
        assert!(!properties.contains_key("geometry"));
    }

    #[test]
    fn test_nested_record() {
        let record = json!({
            "id": "t1",
            "type": {"id": "axm", "nom": "ignored"},
            "domaine": {"id": "m"},
            "statut": {"id": "val"},
            "titulaires": [{"nom": "ACME"}],
            "geojsonMultiPolygon": {"type": "Feature", "geometry": polygon(), "properties": {}}
        });

        let feature = title_to_feature(&record, &metadata());
        let properties = feature.properties.unwrap();

        assert!(feature.geometry.is_some());
        assert_eq!(properties[TYPE_LABEL], "autorisation d'exploitation");
        assert!(!properties.contains_key("type"));
        assert!(!properties.contains_key("titulaires"));
        assert!(!properties.contains_key("geojsonMultiPolygon"));
    }

    #[test]
    fn test_unresolved_keys_leave_labels_absent() {
        let record = json!({"id": "t1", "typeId": "zzz", "statutId": "val"});
        let properties = title_properties(&record, &metadata());

        assert!(!properties.contains_key(TYPE_LABEL));
        assert!(!properties.contains_key(DOMAINE_LABEL));
        assert_eq!(properties[STATUT_LABEL], "valide");
    }

    #[test]
    fn test_empty_metadata() {
        let record = json!({"id": "t1", "typeId": "axm", "domaineId": "m", "statutId": "val"});
        let properties = title_properties(&record, &MetadataBundle::default());

        assert_eq!(properties.len(), 4);
        assert!(!properties.contains_key(STATUT_LABEL));
    }

    #[test]
    fn test_missing_or_invalid_geometry() {
        let missing = title_to_feature(&json!({"id": 7}), &metadata());
        assert!(missing.geometry.is_none());
        assert_eq!(missing.id, Some(Id::Number(7.into())));

        let invalid = title_to_feature(&json!({"geometry": {"type": "Blob"}}), &metadata());
        assert!(invalid.geometry.is_none());
        assert!(invalid.id.is_none());
    }

    #[test_case(json!({"typeId": "axm"}), Some("axm"); "flat key")]
    #[test_case(json!({"type": {"id": "axm"}}), Some("axm"); "nested key")]
    #[test_case(json!({"typeId": 12}), Some("12"); "numeric key")]
    #[test_case(json!({"typeId": ""}), None; "empty key")]
    #[test_case(json!({"type": "axm"}), None; "bare string relation")]
    fn test_foreign_key(record: Value, expected: Option<&str>) {
        assert_eq!(foreign_key(&record, "type").as_deref(), expected);
    }
}
