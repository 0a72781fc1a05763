//! Fetching reference data and title records from the API
//!
//! Every fetch extracts one `data.<field>` array from the response body. A
//! body lacking that shape is [`FetchOutcome::Empty`], not an error; transport,
//! status and JSON errors propagate unchanged.

pub mod metadata;
pub mod queries;
pub mod titles;

#[cfg(test)]
pub(crate) mod testing;

pub use metadata::fetch_metadata;
pub use queries::Queries;
pub use titles::fetch_titles;

use serde_json::Value;

/// Result of extracting `data.<field>` from a response
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The field was present with a usable payload
    Found(T),
    /// The response had no usable payload for the field
    Empty,
}

impl<T> FetchOutcome<T> {
    /// True for [`FetchOutcome::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    /// Payload, if any
    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Found(payload) => Some(payload),
            FetchOutcome::Empty => None,
        }
    }
}

/// Extract `data.<field>` as an array
///
/// Missing `data`, a missing or `null` field, or a non-array payload give
/// [`FetchOutcome::Empty`].
pub fn extract_list(body: &Value, field: &str) -> FetchOutcome<Vec<Value>> {
    match body.get("data").and_then(|data| data.get(field)) {
        Some(Value::Array(items)) => FetchOutcome::Found(items.clone()),
        _ => FetchOutcome::Empty,
    }
}
