//! GraphQL HTTP client
//!
//! This module provides the [`GraphQlApi`] trait the fetchers depend on, and
//! its reqwest-based implementation. Every call is a single POST with no retry.

use super::models::{error_messages, has_no_data, GraphQlRequest};
use crate::config::ApiConfig;
use crate::domain::{ApiError, GeotitresError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Transport used by the fetchers
///
/// Implementations return the parsed response body. Shape checks on
/// `data.<field>` are left to the caller.
#[async_trait]
pub trait GraphQlApi: Send + Sync {
    /// Execute one query
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value>;

    /// Endpoint the queries are sent to
    fn endpoint(&self) -> &str;
}

/// reqwest-backed GraphQL client
///
/// # Example
///
/// ```no_run
/// use geotitres::adapters::graphql::{GraphQlApi, GraphQlClient, GraphQlRequest};
/// use geotitres::config::ApiConfig;
///
/// # async fn example() -> geotitres::domain::Result<()> {
/// let client = GraphQlClient::new(&ApiConfig::default())?;
/// let body = client.execute(&GraphQlRequest::new("{ types { id nom } }")).await?;
/// # Ok(())
/// # }
/// ```
pub struct GraphQlClient {
    endpoint: String,
    client: Client,
    bearer: Option<String>,
}

impl GraphQlClient {
    /// Build a client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build().map_err(|e| {
            GeotitresError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            endpoint: config.url.clone(),
            client,
            bearer: config
                .token
                .as_ref()
                .map(|token| format!("Bearer {}", token.expose_secret().as_ref())),
        })
    }
}

#[async_trait]
impl GraphQlApi for GraphQlClient {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
        tracing::debug!(
            endpoint = %self.endpoint,
            has_variables = request.variables.is_some(),
            "Sending GraphQL query"
        );

        let mut http_request = self.client.post(&self.endpoint).json(request);
        if let Some(ref bearer) = self.bearer {
            http_request = http_request.header(reqwest::header::AUTHORIZATION, bearer);
        }

        let response = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(e.to_string())
            } else {
                ApiError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read body: {e}")))?;

        if status.is_server_error() {
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                message: text,
            }
            .into());
        }
        if !status.is_success() {
            return Err(ApiError::ClientError {
                status: status.as_u16(),
                message: text,
            }
            .into());
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Body is not JSON: {e}")))?;

        // An errors-only body is handed back as is; the caller sees no data
        if let Some(messages) = error_messages(&body) {
            tracing::warn!(
                endpoint = %self.endpoint,
                errors = ?messages,
                has_data = !has_no_data(&body),
                "GraphQL response carries errors"
            );
        }

        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Matcher;
    use serde_json::json;
    use test_case::test_case;

    fn config(url: String) -> ApiConfig {
        ApiConfig {
            url,
            token: None,
            timeout_seconds: Some(5),
        }
    }

    #[tokio::test]
    async fn test_execute_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(json!({"query": "{ types { id } }"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"types":[{"id":"axm"}]}}"#)
            .create_async()
            .await;

        let client = GraphQlClient::new(&config(format!("{}/", server.url()))).unwrap();
        let body = client
            .execute(&GraphQlRequest::new("{ types { id } }"))
            .await
            .unwrap();

        assert_eq!(body["data"]["types"][0]["id"], "axm");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_body(r#"{"data":{}}"#)
            .create_async()
            .await;

        let mut api = config(format!("{}/", server.url()));
        api.token = Some(secret_string("s3cret".to_string()));
        let client = GraphQlClient::new(&api).unwrap();
        client.execute(&GraphQlRequest::new("{ x }")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = GraphQlClient::new(&config(format!("{}/", server.url()))).unwrap();
        let result = client.execute(&GraphQlRequest::new("{ x }")).await;

        assert!(matches!(
            result,
            Err(GeotitresError::Api(ApiError::ServerError { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_client_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(400)
            .create_async()
            .await;

        let client = GraphQlClient::new(&config(format!("{}/", server.url()))).unwrap();
        let result = client.execute(&GraphQlRequest::new("{ x }")).await;

        assert!(matches!(
            result,
            Err(GeotitresError::Api(ApiError::ClientError { status: 400, .. }))
        ));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = GraphQlClient::new(&config(format!("{}/", server.url()))).unwrap();
        let result = client.execute(&GraphQlRequest::new("{ x }")).await;

        assert!(matches!(
            result,
            Err(GeotitresError::Api(ApiError::InvalidResponse(_)))
        ));
    }

    #[test_case(r#"{"errors":[{"message":"Cannot query field"}],"data":null}"# ; "null data")]
    #[test_case(r#"{"errors":[{"message":"statuts unavailable"}]}"# ; "missing data")]
    #[tokio::test]
    async fn test_graphql_errors_without_data_return_body(payload: &str) {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(payload)
            .create_async()
            .await;

        let client = GraphQlClient::new(&config(format!("{}/", server.url()))).unwrap();
        let body = client.execute(&GraphQlRequest::new("{ x }")).await.unwrap();

        assert!(has_no_data(&body));
        assert!(error_messages(&body).is_some());
    }

    #[tokio::test]
    async fn test_connection_failed() {
        // Nothing listens on port 9 (discard) on test hosts
        let client = GraphQlClient::new(&config("http://127.0.0.1:9/".to_string())).unwrap();
        let result = client.execute(&GraphQlRequest::new("{ x }")).await;

        assert!(matches!(
            result,
            Err(GeotitresError::Api(
                ApiError::ConnectionFailed(_) | ApiError::Timeout(_)
            ))
        ));
    }
}
