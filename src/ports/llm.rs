/// LLM service port trait
///
/// Defines the interface for Large Language Model completion services.
/// Implementations: OpenAI, Anthropic
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// System-role instruction
    pub system: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Ask the provider for its guaranteed-JSON response mode
    pub json_mode: bool,
}

/// Configuration for LLM requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name (e.g., "gpt-4o-mini", "claude-3-5-sonnet-latest")
    pub model: String,

    /// Temperature for generation (0.0 to 1.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: Some(0.3), // Lower temperature for more focused outputs
            max_tokens: Some(2000),
        }
    }
}

/// Port trait for LLM services
#[async_trait]
pub trait LlmServicePort: Send + Sync {
    /// Run one completion and return the raw text of the first choice
    ///
    /// Upstream failures are reported as `AppError::SummaryGeneration`.
    async fn complete(&self, request: &CompletionRequest, config: &LlmConfig) -> Result<String>;

    /// Whether the provider can guarantee syntactically valid JSON output
    fn supports_json_mode(&self) -> bool;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
