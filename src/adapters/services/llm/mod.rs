//! LLM service adapters
//!
//! Implementations of the LlmServicePort trait for various providers:
//! - OpenAI (structured JSON response mode)
//! - Anthropic (Claude, prompt-instructed JSON)

pub mod anthropic;
pub mod openai;

pub use anthropic::{AnthropicService, ANTHROPIC_DEFAULT_MODEL};
pub use openai::{OpenAIService, OPENAI_DEFAULT_MODEL};
