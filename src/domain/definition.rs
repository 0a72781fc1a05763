//! Export definitions
//!
//! A definition names one GeoJSON export: the variables sent with the `titres`
//! query and the file the resulting collection is written to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extension given to every generated collection file
pub const GEOJSON_EXTENSION: &str = ".geojson";

/// One configured export unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Display name, copied into the collection properties
    pub nom: String,

    /// Output filename; `.geojson` is appended when missing
    pub fichier: String,

    /// Optional free-text description, copied into the collection properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// GraphQL variables for the `titres` query
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl Definition {
    /// Create a definition with no variables
    pub fn new(nom: impl Into<String>, fichier: impl Into<String>) -> Self {
        Self {
            nom: nom.into(),
            fichier: fichier.into(),
            description: None,
            variables: Map::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a query variable
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Name of the file this definition is written to
    ///
    /// ```
    /// use geotitres::domain::Definition;
    ///
    /// assert_eq!(Definition::new("Guyane", "titres-guyane").file_name(), "titres-guyane.geojson");
    /// assert_eq!(Definition::new("Guyane", "g.geojson").file_name(), "g.geojson");
    /// ```
    pub fn file_name(&self) -> String {
        let fichier = self.fichier.trim();
        if fichier.ends_with(GEOJSON_EXTENSION) {
            fichier.to_string()
        } else {
            format!("{fichier}{GEOJSON_EXTENSION}")
        }
    }

    /// Variables as a JSON value, or `None` when there are none to send
    pub fn variables_value(&self) -> Option<Value> {
        if self.variables.is_empty() {
            None
        } else {
            Some(Value::Object(self.variables.clone()))
        }
    }

    /// Checks the filename is a plain, non-reserved file name
    pub fn validate(&self, manifest_name: &str) -> Result<(), String> {
        if self.nom.trim().is_empty() {
            return Err("definitions.nom cannot be empty".to_string());
        }

        let fichier = self.fichier.trim();
        if fichier.is_empty() {
            return Err(format!("definition '{}' has an empty fichier", self.nom));
        }
        if fichier.contains('/') || fichier.contains('\\') || fichier == "." || fichier == ".." {
            return Err(format!(
                "definition '{}' fichier '{}' must be a plain file name",
                self.nom, self.fichier
            ));
        }
        if self.file_name() == manifest_name {
            return Err(format!(
                "definition '{}' fichier collides with the manifest '{}'",
                self.nom, manifest_name
            ));
        }
        Ok(())
    }
}
