//! In-process GraphQL double for unit tests

use crate::adapters::graphql::{GraphQlApi, GraphQlRequest};
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&GraphQlRequest) -> Result<Value> + Send + Sync>;

/// Answers every request through a closure and records what was sent
pub(crate) struct ScriptedApi {
    responder: Responder,
    pub(crate) requests: Mutex<Vec<GraphQlRequest>>,
}

impl ScriptedApi {
    pub(crate) fn new(
        responder: impl Fn(&GraphQlRequest) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests recorded so far
    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GraphQlApi for ScriptedApi {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        (self.responder)(request)
    }

    fn endpoint(&self) -> &str {
        "scripted://"
    }
}
