//! Record fetcher
//!
//! Sends the `titres` query with one definition's variables.

use super::{extract_list, FetchOutcome};
use crate::adapters::graphql::{GraphQlApi, GraphQlRequest};
use crate::domain::{Definition, Result};
use serde_json::Value;

/// Fetch the title records matching `definition`
///
/// An empty `titres` array is reported as [`FetchOutcome::Empty`] so the
/// caller has a single "nothing to export" case.
///
/// # Errors
///
/// Transport and API errors propagate without local recovery.
pub async fn fetch_titles(
    api: &dyn GraphQlApi,
    query: &str,
    definition: &Definition,
) -> Result<FetchOutcome<Vec<Value>>> {
    let request = GraphQlRequest::new(query).with_variables(definition.variables_value());
    let body = api.execute(&request).await?;

    let outcome = match extract_list(&body, "titres") {
        FetchOutcome::Found(titres) if !titres.is_empty() => FetchOutcome::Found(titres),
        _ => FetchOutcome::Empty,
    };

    let count = match &outcome {
        FetchOutcome::Found(titres) => titres.len(),
        FetchOutcome::Empty => 0,
    };
    tracing::debug!(definition = %definition.nom, count, "Titles fetched");

    Ok(outcome)
}
