//! Export coordinator - main orchestrator for the export process
//!
//! One run walks a fixed sequence of stages:
//!
//! 1. read the query documents
//! 2. reset the output store (wipe + recreate)
//! 3. fetch the metadata bundle
//! 4. for each definition: fetch titles, transform, write or skip
//! 5. write the manifest
//! 6. commit the store
//!
//! Any error aborts the remaining stages and is returned to the caller;
//! nothing already written is rolled back.

use crate::adapters::graphql::{GraphQlApi, GraphQlClient};
use crate::adapters::storage::{LocalDirectory, OutputStore};
use crate::config::{GeotitresConfig, QueriesConfig};
use crate::core::export::manifest::Manifest;
use crate::core::export::summary::ExportSummary;
use crate::core::fetch::{fetch_metadata, fetch_titles, Queries};
use crate::core::transform::{build_feature_collection, collection_file_name, collection_properties};
use crate::domain::{Definition, MetadataBundle, Result};
use futures::{StreamExt, TryStreamExt};
use geojson::JsonObject;
use std::sync::Arc;
use std::time::Instant;

/// What one definition contributed to the run
struct DefinitionOutput {
    entry: JsonObject,
    features: usize,
}

/// Export coordinator
pub struct ExportCoordinator {
    api: Arc<dyn GraphQlApi>,
    store: Arc<dyn OutputStore>,
    queries: QueriesConfig,
    definitions: Vec<Definition>,
    manifest_name: String,
    concurrency: usize,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the configured API and directory
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GeotitresConfig) -> Result<Self> {
        let api: Arc<dyn GraphQlApi> = Arc::new(GraphQlClient::new(&config.api)?);
        let store: Arc<dyn OutputStore> = if config.export.staging {
            Arc::new(LocalDirectory::staged(&config.export.output_dir))
        } else {
            Arc::new(LocalDirectory::new(&config.export.output_dir))
        };

        Ok(Self::with_components(config, api, store))
    }

    /// Create a coordinator with explicit API and store implementations
    pub fn with_components(
        config: &GeotitresConfig,
        api: Arc<dyn GraphQlApi>,
        store: Arc<dyn OutputStore>,
    ) -> Self {
        Self {
            api,
            store,
            queries: config.queries.clone(),
            definitions: config.definitions.clone(),
            manifest_name: config.export.manifest_name.clone(),
            concurrency: config.export.concurrency.max(1),
        }
    }

    /// Execute the export
    ///
    /// Definitions may be processed concurrently (`export.concurrency`), but
    /// results are collected by position so the manifest always follows the
    /// configured order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.definitions.len());

        tracing::info!(
            endpoint = %self.api.endpoint(),
            output = %self.store.location(),
            definitions = self.definitions.len(),
            "Starting export"
        );

        let queries = Queries::load(&self.queries).await?;

        self.store.reset().await?;

        let metadata = fetch_metadata(self.api.as_ref(), &queries).await?;

        let outputs: Vec<Option<DefinitionOutput>> = futures::stream::iter(&self.definitions)
            .map(|definition| self.process_definition(definition, &queries.titres, &metadata))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut slots = Vec::with_capacity(outputs.len());
        for (definition, output) in self.definitions.iter().zip(outputs) {
            match output {
                Some(output) => {
                    summary.add_file(output.features);
                    slots.push(Some(output.entry));
                }
                None => {
                    summary.add_skipped(definition.nom.clone());
                    slots.push(None);
                }
            }
        }

        let manifest = Manifest::from_slots(slots);
        self.store
            .write(&self.manifest_name, &manifest.to_bytes()?)
            .await?;

        self.store.commit().await?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Run the export, logging instead of returning the error
    ///
    /// This is the single place run failures are handled. The output may be
    /// left empty or partially written.
    pub async fn run_once(&self) -> Option<ExportSummary> {
        match self.execute_export().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::error!(error = %e, details = ?e, "Export run failed");
                None
            }
        }
    }

    /// Fetch, transform and write one definition
    async fn process_definition(
        &self,
        definition: &Definition,
        titres_query: &str,
        metadata: &MetadataBundle,
    ) -> Result<Option<DefinitionOutput>> {
        let Some(titres) = fetch_titles(self.api.as_ref(), titres_query, definition)
            .await?
            .into_option()
        else {
            tracing::info!(definition = %definition.nom, "No titles, skipping definition");
            return Ok(None);
        };

        let collection = build_feature_collection(definition, &titres, metadata);
        let file_name = collection_file_name(&collection)
            .map(str::to_string)
            .unwrap_or_else(|| definition.file_name());
        let entry = collection_properties(&collection).cloned().unwrap_or_default();
        let features = collection.features.len();

        let bytes = serde_json::to_vec_pretty(&collection)?;
        self.store.write(&file_name, &bytes).await?;

        tracing::info!(
            definition = %definition.nom,
            file = %file_name,
            features,
            "Collection written"
        );

        Ok(Some(DefinitionOutput { entry, features }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::graphql::GraphQlRequest;
    use crate::core::fetch::testing::ScriptedApi;
    use crate::domain::{ApiError, GeotitresError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Keeps written files in memory, in write order
    #[derive(Default)]
    struct MemoryStore {
        events: Mutex<Vec<String>>,
        files: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl MemoryStore {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn file(&self, name: &str) -> Option<Value> {
            self.files
                .lock()
                .unwrap()
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, bytes)| serde_json::from_slice(bytes).unwrap())
        }
    }

    #[async_trait]
    impl OutputStore for MemoryStore {
        async fn reset(&self) -> Result<()> {
            self.events.lock().unwrap().push("reset".to_string());
            self.files.lock().unwrap().clear();
            Ok(())
        }

        async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
            self.events.lock().unwrap().push(format!("write {name}"));
            self.files
                .lock()
                .unwrap()
                .push((name.to_string(), bytes.to_vec()));
            Ok(())
        }

        async fn commit(&self) -> Result<()> {
            self.events.lock().unwrap().push("commit".to_string());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn config(definitions: Vec<Definition>, queries_dir: &std::path::Path) -> GeotitresConfig {
        for name in ["titres", "types", "domaines", "statuts"] {
            std::fs::write(queries_dir.join(format!("{name}.gql")), name).unwrap();
        }

        let mut config: GeotitresConfig = toml::from_str(
            r#"
[api]
url = "http://localhost/graphql"

[queries]
titres = "titres.gql"
types = "types.gql"
domaines = "domaines.gql"
statuts = "statuts.gql"
"#,
        )
        .unwrap();
        config.resolve_paths(queries_dir);
        config.definitions = definitions;
        config
    }

    fn titre(id: &str) -> Value {
        json!({"id": id, "typeId": "axm", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}})
    }

    fn responder(request: &GraphQlRequest) -> Result<Value> {
        Ok(match request.query.as_str() {
            "types" => json!({"data": {"types": [{"id": "axm", "nom": "autorisation"}]}}),
            "domaines" => json!({"data": {"domaines": []}}),
            "statuts" => json!({}),
            "titres" => {
                let zone = request
                    .variables
                    .as_ref()
                    .and_then(|v| v.get("zone"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                match zone {
                    "a" => json!({"data": {"titres": [titre("a1"), titre("a2"), titre("a3")]}}),
                    "c" => json!({"data": {"titres": [titre("c1")]}}),
                    _ => json!({"data": {"titres": []}}),
                }
            }
            other => panic!("unexpected query {other}"),
        })
    }

    fn definitions() -> Vec<Definition> {
        vec![
            Definition::new("A", "A").with_variable("zone", json!("a")),
            Definition::new("B", "B").with_variable("zone", json!("b")),
            Definition::new("C", "C").with_variable("zone", json!("c")),
        ]
    }

    #[tokio::test]
    async fn test_stage_order_and_skip() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let coordinator = ExportCoordinator::with_components(
            &config(definitions(), temp.path()),
            Arc::new(ScriptedApi::new(responder)),
            store.clone(),
        );

        let summary = coordinator.execute_export().await.unwrap();

        assert_eq!(
            store.events(),
            vec![
                "reset",
                "write A.geojson",
                "write C.geojson",
                "write infos.json",
                "commit"
            ]
        );
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.total_features, 4);
        assert_eq!(summary.skipped_definitions, vec!["B".to_string()]);

        let a = store.file("A.geojson").unwrap();
        assert_eq!(a["features"].as_array().unwrap().len(), 3);
        assert_eq!(a["features"][0]["properties"]["typeNom"], "autorisation");

        let manifest = store.file("infos.json").unwrap();
        assert_eq!(
            manifest,
            json!([
                {"fichier": "A.geojson", "nom": "A", "total": 3},
                {"fichier": "C.geojson", "nom": "C", "total": 1}
            ])
        );
    }

    /// Holds back the answer for zone `a` so later definitions finish first
    struct SlowFirstApi {
        inner: ScriptedApi,
    }

    #[async_trait]
    impl GraphQlApi for SlowFirstApi {
        async fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
            let zone = request
                .variables
                .as_ref()
                .and_then(|v| v.get("zone"))
                .and_then(Value::as_str);
            if zone == Some("a") {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
            self.inner.execute(request).await
        }

        fn endpoint(&self) -> &str {
            self.inner.endpoint()
        }
    }

    #[tokio::test]
    async fn test_concurrent_runs_keep_definition_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = config(definitions(), temp.path());
        config.export.concurrency = 3;
        let store = Arc::new(MemoryStore::default());
        let coordinator = ExportCoordinator::with_components(
            &config,
            Arc::new(SlowFirstApi {
                inner: ScriptedApi::new(responder),
            }),
            store.clone(),
        );

        let summary = coordinator.execute_export().await.unwrap();

        // C completes while A is still waiting on the API
        assert_eq!(
            store.events(),
            vec![
                "reset",
                "write C.geojson",
                "write A.geojson",
                "write infos.json",
                "commit"
            ]
        );

        let manifest = store.file("infos.json").unwrap();
        assert_eq!(manifest.as_array().unwrap().len(), 2);
        assert_eq!(manifest[0]["fichier"], "A.geojson");
        assert_eq!(manifest[1]["fichier"], "C.geojson");
        assert_eq!(summary.skipped_definitions, vec!["B".to_string()]);
    }

    #[tokio::test]
    async fn test_sequential_runs_write_in_definition_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let coordinator = ExportCoordinator::with_components(
            &config(definitions(), temp.path()),
            Arc::new(SlowFirstApi {
                inner: ScriptedApi::new(responder),
            }),
            store.clone(),
        );

        coordinator.execute_export().await.unwrap();

        assert_eq!(
            store.events(),
            vec![
                "reset",
                "write A.geojson",
                "write C.geojson",
                "write infos.json",
                "commit"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_definitions_writes_empty_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let coordinator = ExportCoordinator::with_components(
            &config(Vec::new(), temp.path()),
            Arc::new(ScriptedApi::new(responder)),
            store.clone(),
        );

        let summary = coordinator.execute_export().await.unwrap();

        assert_eq!(summary.files_written, 0);
        assert_eq!(store.events(), vec!["reset", "write infos.json", "commit"]);
        assert_eq!(store.file("infos.json").unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_failure_aborts_without_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let api = ScriptedApi::new(|request| {
            let zone = request
                .variables
                .as_ref()
                .and_then(|v| v.get("zone"))
                .and_then(Value::as_str);
            if zone == Some("b") {
                Err(ApiError::ServerError {
                    status: 500,
                    message: "boom".to_string(),
                }
                .into())
            } else {
                responder(request)
            }
        });
        let coordinator = ExportCoordinator::with_components(
            &config(definitions(), temp.path()),
            Arc::new(api),
            store.clone(),
        );

        let result = coordinator.execute_export().await;

        assert!(matches!(result, Err(GeotitresError::Api(_))));
        assert_eq!(store.events(), vec!["reset", "write A.geojson"]);
        assert!(coordinator.run_once().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_query_file_fails_before_reset() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = config(definitions(), temp.path());
        std::fs::remove_file(temp.path().join("titres.gql")).unwrap();
        let store = Arc::new(MemoryStore::default());
        let coordinator = ExportCoordinator::with_components(
            &config,
            Arc::new(ScriptedApi::new(responder)),
            store.clone(),
        );

        assert!(coordinator.execute_export().await.is_err());
        assert!(store.events().is_empty());
    }
}
