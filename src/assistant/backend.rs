//! Agent query service client

use super::BackendError;
use crate::config::BackendConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text used when the backend answers 200 without an `answer` field
pub const EMPTY_ANSWER: &str = "No response from AI";

/// Something that can answer a travel question
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Ask a single question. One attempt, no retries.
    async fn query(&self, question: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    answer: Option<serde_json::Value>,
}

/// Backend reached over HTTP at `<url>/query`
pub struct HttpAgentBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAgentBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }

    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}

#[async_trait]
impl AgentBackend for HttpAgentBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn query(&self, question: &str) -> Result<String, BackendError> {
        let timeout_secs = self.timeout.as_secs();
        let response = self
            .client
            .post(self.query_url())
            .timeout(self.timeout)
            .json(&QueryRequest { question })
            .send()
            .await
            .map_err(|e| BackendError::from_network_error(e, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::from_http_status(status, body));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| BackendError::from_network_error(e, timeout_secs))?;

        Ok(match body.answer {
            Some(serde_json::Value::String(answer)) => answer,
            Some(serde_json::Value::Null) | None => EMPTY_ANSWER.to_string(),
            Some(other) => other.to_string(),
        })
    }
}
