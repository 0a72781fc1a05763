//! GraphQL wire models
//!
//! Request body is `{query, variables?}`; responses are kept as raw JSON and
//! only the `errors` array is interpreted here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of one GraphQL call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    /// Query document
    pub query: String,

    /// Variables, omitted from the body when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQlRequest {
    /// Request without variables
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Attach variables
    pub fn with_variables(mut self, variables: Option<Value>) -> Self {
        self.variables = variables;
        self
    }
}

/// Messages of the `errors` array, if the body carries a non-empty one
pub fn error_messages(body: &Value) -> Option<Vec<String>> {
    let errors = body.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(|error| match error.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => error.to_string(),
            })
            .collect(),
    )
}

/// True when `data` is missing or null
pub fn has_no_data(body: &Value) -> bool {
    body.get("data").map_or(true, Value::is_null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_variables() {
        let body = serde_json::to_value(GraphQlRequest::new("{ types { id } }")).unwrap();
        assert_eq!(body, json!({"query": "{ types { id } }"}));
    }

    #[test]
    fn test_request_with_variables() {
        let request = GraphQlRequest::new("query Titres($d: [ID]) { titres(domaineIds: $d) { id } }")
            .with_variables(Some(json!({"d": ["m"]})));
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body["variables"], json!({"d": ["m"]}));
    }

    #[test]
    fn test_error_messages() {
        let body = json!({"errors": [{"message": "boom"}, {"code": 1}], "data": null});
        let messages = error_messages(&body).unwrap();
        assert_eq!(messages, vec!["boom".to_string(), r#"{"code":1}"#.to_string()]);
        assert!(has_no_data(&body));
    }

    #[test]
    fn test_no_errors() {
        let body = json!({"data": {"types": []}, "errors": []});
        assert!(error_messages(&body).is_none());
        assert!(!has_no_data(&body));
    }
}
