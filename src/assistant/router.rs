//! Response routing: agent backend first, keyword fallback second

use super::backend::{AgentBackend, HttpAgentBackend};
use super::fallback::KeywordTable;
use super::localize::CurrencyLocalizer;
use super::BackendError;
use crate::config::Config;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Agent,
    Fallback,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Agent => write!(f, "agent"),
            ReplySource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Answers utterances, never failing: backend errors turn into canned replies
#[derive(Clone)]
pub struct ResponseRouter {
    backend: Arc<dyn AgentBackend>,
    table: KeywordTable,
    localizer: CurrencyLocalizer,
    timeout: Duration,
}

impl ResponseRouter {
    pub fn new(backend: Arc<dyn AgentBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            table: KeywordTable::default(),
            localizer: CurrencyLocalizer::default(),
            timeout,
        }
    }

    /// Router talking to the HTTP backend described by `config`
    pub fn from_config(config: &Config) -> Self {
        let backend = Arc::new(HttpAgentBackend::new(&config.backend));
        Self::new(backend, config.backend.timeout())
            .with_localizer(CurrencyLocalizer::from_config(&config.localization))
    }

    pub fn with_localizer(mut self, localizer: CurrencyLocalizer) -> Self {
        self.localizer = localizer;
        self
    }

    /// Try the backend once; on any failure pick a reply from the keyword table
    pub async fn route(&self, utterance: &str) -> Reply {
        match self.call_backend(utterance).await {
            Ok(text) => Reply {
                text,
                source: ReplySource::Agent,
            },
            Err(e) => {
                let reason = if e.is_timeout() { "too slow" } else { "unavailable" };
                tracing::warn!(
                    "Agent backend '{}' {}, using fallback: {}",
                    self.backend.name(),
                    reason,
                    e
                );
                Reply {
                    text: self.table.select(utterance).to_string(),
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    /// Route, then localize currency symbols against the same utterance
    pub async fn answer(&self, utterance: &str) -> Reply {
        let reply = self.route(utterance).await;
        Reply {
            text: self.localizer.localize(&reply.text, utterance),
            source: reply.source,
        }
    }

    async fn call_backend(&self, utterance: &str) -> Result<String, BackendError> {
        match timeout(self.timeout, self.backend.query(utterance)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fallback::{DEFAULT_RESPONSE, TRAVEL_RESPONSES};
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Answer(&'static str),
        Fail(fn() -> BackendError),
        Hang,
    }

    struct MockBackend {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AgentBackend for MockBackend {
        fn name(&self) -> &str {
            "mock"
        }

        async fn query(&self, _question: &str) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Answer(text) => Ok(text.to_string()),
                Behavior::Fail(make) => Err(make()),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn weather_response() -> &'static str {
        TRAVEL_RESPONSES
            .iter()
            .find(|(k, _)| *k == "weather")
            .map(|(_, r)| *r)
            .unwrap()
    }

    #[tokio::test]
    async fn test_agent_answer_passes_through() {
        let backend = MockBackend::new(Behavior::Answer("Visit Kyoto in April."));
        let router = ResponseRouter::new(backend.clone(), Duration::from_secs(5));

        let reply = router.route("paris or japan?").await;
        assert_eq!(reply.text, "Visit Kyoto in April.");
        assert_eq!(reply.source, ReplySource::Agent);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_error_falls_back_to_keyword() {
        let backend = MockBackend::new(Behavior::Fail(|| BackendError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        }));
        let router = ResponseRouter::new(backend, Duration::from_secs(5));

        let reply = router.route("weather in Tokyo").await;
        assert_eq!(reply.text, weather_response());
        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_without_retry() {
        let backend = MockBackend::new(Behavior::Hang);
        let router = ResponseRouter::new(backend.clone(), Duration::from_millis(50));

        let reply = router.route("weather in Tokyo").await;
        assert_eq!(reply.text, weather_response());
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unmatched_fallback_is_default() {
        let backend = MockBackend::new(Behavior::Fail(|| {
            BackendError::Network("connection refused".to_string())
        }));
        let router = ResponseRouter::new(backend, Duration::from_secs(5));

        assert_eq!(router.route("hello").await.text, DEFAULT_RESPONSE);
    }

    #[tokio::test]
    async fn test_answer_localizes_agent_text() {
        let backend = MockBackend::new(Behavior::Answer("Hotels from $40, meals $ 5"));
        let router = ResponseRouter::new(backend, Duration::from_secs(5));

        let reply = router.answer("Budget trip to Manali").await;
        assert_eq!(reply.text, "Hotels from ₹40, meals ₹ 5");
    }

    #[tokio::test]
    async fn test_answer_localizes_fallback_text() {
        let backend = MockBackend::new(Behavior::Fail(|| BackendError::Timeout(30)));
        let router = ResponseRouter::new(backend, Duration::from_secs(5));

        // "paris" wins the table; "inr" selects rupees
        let reply = router.answer("paris prices in INR").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.text.contains("Budget: ₹150-300/day"));
        assert!(!reply.text.contains('$'));
    }

    #[tokio::test]
    async fn test_answer_without_locale_keeps_dollars() {
        let backend = MockBackend::new(Behavior::Fail(|| BackendError::Timeout(30)));
        let router = ResponseRouter::new(backend, Duration::from_secs(5));

        let reply = router.answer("trip to paris").await;
        assert!(reply.text.contains("Budget: $150-300/day"));
    }

    #[test]
    fn test_reply_source_display() {
        assert_eq!(ReplySource::Agent.to_string(), "agent");
        assert_eq!(
            serde_json::to_string(&ReplySource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
