// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! One POST per completion, retried once when the API reports a transient
//! failure (rate limit or overload).

use std::time::Duration;

use nowhere_core::NowhereError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(MessageResponse),
    Retryable(NowhereError),
}

/// Authenticated client for the Messages endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    endpoint: String,
    default_model: String,
    retries: u32,
}

impl AnthropicClient {
    /// `request_timeout` bounds each HTTP attempt; callers apply their own
    /// overall deadline on top.
    pub fn new(
        api_key: String,
        api_version: String,
        model: String,
        request_timeout: Duration,
    ) -> Result<Self, NowhereError> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", header_value("API key", &api_key)?);
        headers.insert("anthropic-version", header_value("API version", &api_version)?);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| provider_err("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            endpoint: API_BASE_URL.to_string(),
            default_model: model,
            retries: 1,
        })
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Points the client at another endpoint, such as a proxy or a mock server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Sends `request`, retrying transient failures.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, NowhereError> {
        let mut attempt = 0;
        loop {
            match self.attempt(request).await? {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retryable(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "transient model API error, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Attempt::Retryable(err) => return Err(err),
            }
        }
    }

    async fn attempt(&self, request: &MessageRequest) -> Result<Attempt, NowhereError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| provider_err("HTTP request failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| provider_err("failed to read response body", e))?;
        debug!(%status, bytes = body.len(), "model API responded");

        if status.is_success() {
            let parsed = serde_json::from_str(&body)
                .map_err(|e| provider_err("failed to parse API response", e))?;
            return Ok(Attempt::Done(parsed));
        }

        let err = NowhereError::Provider {
            message: describe_failure(status, &body),
            source: None,
        };
        if is_transient(status) {
            Ok(Attempt::Retryable(err))
        } else {
            Err(err)
        }
    }
}

fn header_value(what: &str, raw: &str) -> Result<HeaderValue, NowhereError> {
    HeaderValue::from_str(raw)
        .map_err(|e| NowhereError::Config(format!("invalid {what} header value: {e}")))
}

fn provider_err<E>(context: &str, err: E) -> NowhereError
where
    E: std::error::Error + Send + Sync + 'static,
{
    NowhereError::Provider {
        message: format!("{context}: {err}"),
        source: Some(Box::new(err)),
    }
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api) => format!("Anthropic API error ({}): {}", api.error.type_, api.error.message),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

fn is_transient(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
