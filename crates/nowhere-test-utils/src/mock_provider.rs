// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language-model provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nowhere_core::{
    AdapterType, HealthStatus, NowhereError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};

/// One scripted outcome.
#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Fail(String),
    Delay(Duration, String),
}

/// A mock provider that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every request is recorded.
#[derive(Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(Outcome::Reply).collect(),
            )),
            requests: Arc::default(),
        }
    }

    /// Queue a successful reply.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Reply(text.into()));
    }

    /// Queue a provider error.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Fail(message.into()));
    }

    /// Queue a reply that arrives after `delay`.
    pub async fn add_delayed_response(&self, delay: Duration, text: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Delay(delay, text.into()));
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Outcome::Reply("mock response".to_string()))
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, NowhereError> {
        self.requests.lock().await.push(request.clone());

        let text = match self.next_outcome().await {
            Outcome::Reply(text) => text,
            Outcome::Fail(message) => {
                return Err(NowhereError::Provider {
                    message,
                    source: None,
                });
            }
            Outcome::Delay(delay, text) => {
                tokio::time::sleep(delay).await;
                text
            }
        };

        Ok(ProviderResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content: text,
            model: request.model,
            stop_reason: Some("end_turn".to_string()),
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use nowhere_core::ProviderMessage;

    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "mock-model".into(),
            system_prompt: None,
            messages: vec![ProviderMessage::user("hi")],
            max_tokens: 100,
            session_key: None,
        }
    }

    #[tokio::test]
    async fn returns_scripted_then_default() {
        let provider = MockProvider::with_responses(vec!["first".into()]);
        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(
            provider.complete(request()).await.unwrap().content,
            "mock response"
        );
        assert_eq!(provider.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn scripted_failure_is_an_error() {
        let provider = MockProvider::new();
        provider.add_failure("overloaded").await;
        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_reply_waits() {
        let provider = MockProvider::new();
        provider
            .add_delayed_response(Duration::from_secs(5), "late")
            .await;
        let started = tokio::time::Instant::now();
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "late");
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
