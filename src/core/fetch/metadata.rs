//! Metadata fetcher
//!
//! Loads the `types`, `domaines` and `statuts` lookups. The three calls are
//! independent and run concurrently; any of them coming back without data
//! leaves the matching lookup empty.

use super::{extract_list, FetchOutcome, Queries};
use crate::adapters::graphql::{GraphQlApi, GraphQlRequest};
use crate::domain::{MetaLookup, MetadataBundle, Result};
use serde_json::Value;

/// Fetch the three lookup tables
///
/// # Errors
///
/// Returns the first transport or API error; a missing `data.<field>` is not
/// an error.
pub async fn fetch_metadata(api: &dyn GraphQlApi, queries: &Queries) -> Result<MetadataBundle> {
    let (types, domaines, statuts) = tokio::try_join!(
        fetch_list(api, &queries.types, "types"),
        fetch_list(api, &queries.domaines, "domaines"),
        fetch_list(api, &queries.statuts, "statuts"),
    )?;

    let bundle = MetadataBundle {
        types: to_lookup(types, "types"),
        domaines: to_lookup(domaines, "domaines"),
        statuts: to_lookup(statuts, "statuts"),
    };

    tracing::info!(
        types = bundle.types.len(),
        domaines = bundle.domaines.len(),
        statuts = bundle.statuts.len(),
        "Metadata loaded"
    );

    Ok(bundle)
}

/// Send one metadata query and extract `data.<field>`
pub async fn fetch_list(
    api: &dyn GraphQlApi,
    query: &str,
    field: &str,
) -> Result<FetchOutcome<Vec<Value>>> {
    let body = api.execute(&GraphQlRequest::new(query)).await?;
    Ok(extract_list(&body, field))
}

fn to_lookup(outcome: FetchOutcome<Vec<Value>>, field: &str) -> MetaLookup {
    match outcome {
        FetchOutcome::Found(values) => MetaLookup::from_values(&values),
        FetchOutcome::Empty => {
            tracing::warn!(field, "No metadata returned, labels will be missing");
            MetaLookup::default()
        }
    }
}
