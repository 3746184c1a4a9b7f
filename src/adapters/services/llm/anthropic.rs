//! Anthropic LLM service adapter
//!
//! Implements the LlmServicePort for Anthropic's messages API (Claude models).
//! The API has no guaranteed-JSON mode, so JSON output relies on the system prompt.

use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Default model when none is configured
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Anthropic service implementation
pub struct AnthropicService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl AnthropicService {
    /// Create a new Anthropic service with the given API key
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: ANTHROPIC_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request(request: &CompletionRequest, config: &LlmConfig) -> MessagesRequest {
        MessagesRequest {
            model: config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            // Anthropic requires max_tokens to be specified
            max_tokens: config.max_tokens.unwrap_or(4096),
            system: request.system.clone(),
            temperature: config.temperature,
        }
    }

    /// Concatenates the text blocks of a response
    fn response_text(response: MessagesResponse) -> Option<String> {
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text)
            .collect();

        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl LlmServicePort for AnthropicService {
    async fn complete(&self, request: &CompletionRequest, config: &LlmConfig) -> Result<String> {
        if request.json_mode {
            log::debug!("Anthropic has no JSON response mode; relying on the system prompt");
        }

        let request_body = Self::build_request(request, config);

        log::info!(
            "Calling Anthropic messages API with model: {}",
            config.model
        );

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::SummaryGeneration(format!("Messages request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            log::warn!("Anthropic returned {}: {}", status, message);
            return Err(AppError::SummaryGeneration(format!(
                "Messages request failed ({}): {}",
                status, message
            )));
        }

        let messages_response: MessagesResponse = response.json().await.map_err(|e| {
            AppError::SummaryGeneration(format!("Failed to parse messages response: {}", e))
        })?;

        if messages_response.stop_reason.as_deref() == Some("max_tokens") {
            log::warn!("Anthropic completion was truncated at max_tokens");
        }

        let content = Self::response_text(messages_response).ok_or_else(|| {
            AppError::SummaryGeneration("No content blocks returned".to_string())
        })?;

        log::info!(
            "Anthropic completion successful, generated {} characters",
            content.len()
        );

        Ok(content)
    }

    fn supports_json_mode(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}
