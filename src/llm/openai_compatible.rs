// ABOUTME: OpenAI-compatible chat completion provider used for OpenRouter
// ABOUTME: Sends bearer-authenticated requests with attribution headers and maps API errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Talks to any endpoint implementing `POST {base}/chat/completions`. The
//! default configuration targets `OpenRouter`, which additionally reads the
//! `HTTP-Referer` and `X-Title` headers for attribution.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::llm::CONNECT_TIMEOUT_SECS;
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;

/// Service label used in error messages
const SERVICE: &str = "OpenRouter";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://openrouter.ai/api/v1>)
    pub base_url: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// `HTTP-Referer` header value
    pub referer: String,
    /// `X-Title` header value
    pub app_title: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
            request_timeout: config.request_timeout,
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Parse error response from API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) else {
            return AppError::external_service(
                SERVICE,
                format!(
                    "API error ({}): {}",
                    status,
                    body.chars().take(200).collect::<String>()
                ),
            )
            .with_details(serde_json::json!({ "status": status.as_u16() }));
        };

        let message = error_response.error.message;
        match status.as_u16() {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("API authentication failed: {message}"),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                "LLM rate limit reached. Please wait a moment and try again.",
            ),
            503 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{SERVICE}: {message}"),
            ),
            _ => {
                let error_type = error_response
                    .error
                    .error_type
                    .unwrap_or_else(|| "unknown".to_owned());
                AppError::external_service(SERVICE, format!("{error_type} - {message}"))
                    .with_details(serde_json::json!({ "status": status.as_u16() }))
            }
        }
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    /// Wire body for `request` against the configured model
    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: self.config.default_model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            max_tokens: request.max_tokens,
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let openai_request = self.build_request(request);
        let model = openai_request.model.as_str();
        debug!(
            "Sending chat completion request with {} messages",
            openai_request.messages.len()
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {}: {}", SERVICE, e);
                if e.is_connect() || e.is_timeout() {
                    AppError::new(
                        ErrorCode::ExternalServiceUnavailable,
                        format!("Cannot reach {}: {e}", self.config.base_url),
                    )
                } else {
                    AppError::external_service(SERVICE, format!("Failed to connect: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse API response: {} - body: {}",
                e,
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE, "API returned no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default().trim().to_owned(),
            model: openai_response.model.unwrap_or_else(|| model.to_owned()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %self.config.default_model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let started = Instant::now();
        let result = self.send(request).await;
        AppLogger::log_llm_call(
            self.name(),
            &self.config.default_model,
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
            base_url: "https://openrouter.ai/api/v1/".to_owned(),
            ..OpenAiCompatibleConfig::default()
        })
        .unwrap();
        assert_eq!(
            provider.api_url("chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_uses_configured_model_and_token_limit() {
        let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
            default_model: "test/model".to_owned(),
            ..OpenAiCompatibleConfig::default()
        })
        .unwrap();

        let limited = provider.build_request(&ChatRequest::prompt("sys", "hi").with_max_tokens(64));
        let json = serde_json::to_value(&limited).unwrap();
        assert_eq!(json["model"], "test/model");
        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");

        let unlimited = provider.build_request(&ChatRequest::prompt("sys", "hi"));
        let json = serde_json::to_value(&unlimited).unwrap();
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_error_response_maps_status() {
        let body = r#"{"error":{"message":"bad key","type":"auth"}}"#;
        let err = OpenAiCompatibleProvider::parse_error_response(
            reqwest::StatusCode::UNAUTHORIZED,
            body,
        );
        assert_eq!(err.code, ErrorCode::ExternalAuthFailed);

        let err = OpenAiCompatibleProvider::parse_error_response(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            body,
        );
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    }

    #[test]
    fn test_parse_error_response_non_json_body() {
        let err = OpenAiCompatibleProvider::parse_error_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>upstream down</html>",
        );
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.contains("upstream down"));
    }
}
