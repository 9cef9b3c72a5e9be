// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter.
//!
//! Implements [`ProviderAdapter`] for the Anthropic Messages API. The
//! provider is constructed once at startup and shared by every request.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use nowhere_config::model::LlmConfig;
use nowhere_core::{
    AdapterType, HealthStatus, NowhereError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, NowhereError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = AnthropicClient::new(
            api_key,
            config.api_version.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = config.model, "Anthropic provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    fn to_message_request(&self, request: &ProviderRequest) -> MessageRequest {
        let model = if request.model.is_empty() {
            self.client.default_model().to_string()
        } else {
            request.model.clone()
        };

        MessageRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        // Avoids spending tokens; a constructed client is considered healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, NowhereError> {
        let api_request = self.to_message_request(&request);
        debug!(
            session = request.session_key.as_deref().unwrap_or("-"),
            turns = api_request.messages.len(),
            "sending completion request"
        );
        let response = self.client.complete_message(&api_request).await?;

        Ok(ProviderResponse {
            content: response.text(),
            id: response.id,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, NowhereError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            NowhereError::Config(
                "Anthropic API key not found. Set llm.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
            )
        })
}
