//! Application configuration
//!
//! Read from command-line flags or environment variables (a `.env` file is loaded
//! first by `main`). Provider credentials are optional: the server starts without
//! them and the affected endpoints report a configuration error.

use crate::adapters::services::llm::{ANTHROPIC_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL};
use crate::adapters::services::mail::DEFAULT_RESEND_BASE_URL;
use crate::ports::llm::LlmConfig;
use crate::ports::notification::DeliveryMode;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LlmProvider {
    Openai,
    Anthropic,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Openai => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Interface to bind the HTTP server to
    #[arg(long, env, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env, default_value_t = 3000)]
    pub port: u16,

    /// Which LLM provider generates summaries
    #[arg(long, env, value_enum, default_value_t = LlmProvider::Openai)]
    pub llm_provider: LlmProvider,

    /// API key for OpenAI
    #[arg(long, env, hide_env_values = true)]
    openai_api_key: Option<String>,

    /// API key for Anthropic
    #[arg(long, env, hide_env_values = true)]
    anthropic_api_key: Option<String>,

    /// Model name; defaults to a provider-specific model
    #[arg(long, env)]
    llm_model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env)]
    openai_base_url: Option<String>,

    /// Anthropic API base URL
    #[arg(long, env)]
    anthropic_base_url: Option<String>,

    /// Sampling temperature
    #[arg(long, env, default_value_t = 0.3)]
    pub llm_temperature: f32,

    /// Maximum tokens in the model's reply
    #[arg(long, env, default_value_t = 2000)]
    pub llm_max_tokens: u32,

    /// API key for the Resend email API
    #[arg(long, env, hide_env_values = true)]
    resend_api_key: Option<String>,

    /// Base URL of the Resend email API
    #[arg(long, env, default_value = DEFAULT_RESEND_BASE_URL)]
    pub resend_base_url: String,

    /// Sender address for summary emails
    #[arg(long, env, default_value = "Meeting Summaries <onboarding@resend.dev>")]
    pub mail_from: String,

    /// Subject line of summary emails
    #[arg(long, env, default_value = "Meeting Summary and Action Items")]
    pub email_subject: String,

    /// `redirect` sends everything to the operator address, `direct` to each recipient
    #[arg(long, env, value_enum, default_value_t = DeliveryMode::Redirect)]
    pub delivery_mode: DeliveryMode,

    /// Address that receives all mail in redirect mode
    #[arg(long, env)]
    operator_email: Option<String>,

    /// Directory for temporary copies of uploads
    #[arg(long, env)]
    upload_dir: Option<PathBuf>,

    /// Timeout for outbound provider requests, in seconds
    #[arg(long, env, default_value_t = 120)]
    pub http_timeout_secs: u64,

    /// Maximum accepted request body size, in bytes
    #[arg(long, env, default_value_t = 25 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Config {
    /// API key for the selected LLM provider, if set and non-empty
    pub fn llm_api_key(&self) -> Option<String> {
        let key = match self.llm_provider {
            LlmProvider::Openai => self.openai_api_key.as_ref(),
            LlmProvider::Anthropic => self.anthropic_api_key.as_ref(),
        };
        key.filter(|k| !k.trim().is_empty()).cloned()
    }

    /// Base URL override for the selected LLM provider
    pub fn llm_base_url(&self) -> Option<String> {
        let url = match self.llm_provider {
            LlmProvider::Openai => self.openai_base_url.as_ref(),
            LlmProvider::Anthropic => self.anthropic_base_url.as_ref(),
        };
        url.filter(|u| !u.trim().is_empty()).cloned()
    }

    /// Returns the Resend API key, if configured.
    pub fn resend_api_key(&self) -> Option<String> {
        self.resend_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn operator_email(&self) -> Option<String> {
        self.operator_email
            .clone()
            .filter(|e| !e.trim().is_empty())
    }

    pub fn llm_config(&self) -> LlmConfig {
        let model = self.llm_model.clone().unwrap_or_else(|| {
            match self.llm_provider {
                LlmProvider::Openai => OPENAI_DEFAULT_MODEL,
                LlmProvider::Anthropic => ANTHROPIC_DEFAULT_MODEL,
            }
            .to_string()
        });

        LlmConfig {
            model,
            temperature: Some(self.llm_temperature),
            max_tokens: Some(self.llm_max_tokens),
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("meeting-mailer-uploads"))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
