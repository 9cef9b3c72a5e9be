// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model channel.
//!
//! Unlike email, completions are awaited because callers persist and return
//! the text. Every call is bounded by a wall-clock timeout; on timeout or
//! provider error the caller receives a fixed fallback string instead of an
//! error.

use std::sync::Arc;
use std::time::Duration;

use nowhere_config::model::LlmConfig;
use nowhere_core::{NowhereError, ProviderAdapter, ProviderMessage, ProviderRequest};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::prompts;

/// Outcome of a completion: the text, and whether it is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub degraded: bool,
}

/// Inputs for a strategy proposal. Absent fields read as "Not specified".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyBrief {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub target_market: Option<String>,
    #[serde(default)]
    pub challenges: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

impl StrategyBrief {
    fn prompt(&self) -> String {
        fn or_unspecified(value: &Option<String>) -> &str {
            value.as_deref().filter(|v| !v.trim().is_empty()).unwrap_or("Not specified")
        }
        format!(
            "Create a digital marketing strategy proposal for:

Business: {}
Industry: {}
Target Market: {}
Current Challenges: {}
Goals: {}
Budget Range: {}",
            or_unspecified(&self.business_name),
            or_unspecified(&self.industry),
            self.target_market
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or("UAE"),
            or_unspecified(&self.challenges),
            or_unspecified(&self.goals),
            or_unspecified(&self.budget),
        )
    }
}

/// Timeout-bounded access to the hosted language model.
#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn ProviderAdapter>,
    timeout: Duration,
    max_tokens: u32,
}

impl Assistant {
    pub fn new(provider: Arc<dyn ProviderAdapter>, timeout: Duration, max_tokens: u32) -> Self {
        Self {
            provider,
            timeout,
            max_tokens,
        }
    }

    pub fn from_config(provider: Arc<dyn ProviderAdapter>, config: &LlmConfig) -> Self {
        Self::new(
            provider,
            Duration::from_secs(config.timeout_secs),
            config.max_tokens,
        )
    }

    /// Chat reply in the context of `history` (oldest first).
    pub async fn reply(
        &self,
        session_id: &str,
        history: Vec<ProviderMessage>,
        message: &str,
    ) -> Completion {
        let mut messages = history;
        messages.push(ProviderMessage::user(message));
        let request = self.request(
            Some(prompts::CHAT_SYSTEM_PROMPT.to_string()),
            messages,
            Some(session_id.to_string()),
        );
        self.complete_or(request, prompts::CHAT_FALLBACK, "chat").await
    }

    /// Marketing content of the given type.
    pub async fn generate_content(&self, content_type: &str, prompt: &str) -> Completion {
        let request = self.request(
            Some(prompts::system_prompt_for(content_type).to_string()),
            vec![ProviderMessage::user(prompt)],
            None,
        );
        self.complete_or(request, prompts::CONTENT_FALLBACK, "content")
            .await
    }

    pub async fn recommend_services(&self, business_info: &str) -> Completion {
        let request = self.request(
            Some(prompts::RECOMMENDATIONS_SYSTEM_PROMPT.to_string()),
            vec![ProviderMessage::user(business_info)],
            None,
        );
        self.complete_or(request, prompts::RECOMMENDATIONS_FALLBACK, "recommendations")
            .await
    }

    pub async fn analyze_market(&self, industry: &str, location: &str) -> Completion {
        let request = self.request(
            Some(prompts::market_trends_system_prompt(industry, location)),
            vec![ProviderMessage::user(prompts::market_trends_prompt(
                industry, location,
            ))],
            None,
        );
        self.complete_or(request, prompts::MARKET_TRENDS_FALLBACK, "market_trends")
            .await
    }

    pub async fn propose_strategy(&self, brief: &StrategyBrief) -> Completion {
        let request = self.request(
            Some(prompts::STRATEGY_SYSTEM_PROMPT.to_string()),
            vec![ProviderMessage::user(brief.prompt())],
            None,
        );
        self.complete_or(request, prompts::STRATEGY_FALLBACK, "strategy")
            .await
    }

    fn request(
        &self,
        system_prompt: Option<String>,
        messages: Vec<ProviderMessage>,
        session_key: Option<String>,
    ) -> ProviderRequest {
        ProviderRequest {
            model: String::new(),
            system_prompt,
            messages,
            max_tokens: self.max_tokens,
            session_key,
        }
    }

    async fn complete_or(
        &self,
        request: ProviderRequest,
        fallback: &str,
        purpose: &'static str,
    ) -> Completion {
        let session = request.session_key.clone();
        match self.complete(request).await {
            Ok(text) => {
                debug!(purpose, session = ?session, chars = text.len(), "completion received");
                Completion {
                    text,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(purpose, session = ?session, error = %e, "language model unavailable, using fallback");
                Completion {
                    text: fallback.to_string(),
                    degraded: true,
                }
            }
        }
    }

    async fn complete(&self, request: ProviderRequest) -> Result<String, NowhereError> {
        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| NowhereError::Timeout {
                duration: self.timeout,
            })??;
        if response.content.trim().is_empty() {
            return Err(NowhereError::Provider {
                message: "empty completion".into(),
                source: None,
            });
        }
        Ok(response.content)
    }
}
