mod adapters;
mod api;
mod config;
mod domain;
mod error;
mod pipeline;
mod ports;

use adapters::notification::{DirectDispatcher, RedirectDispatcher};
use adapters::services::llm::{AnthropicService, OpenAIService};
use adapters::services::mail::ResendService;
use adapters::storage::TempDirStorage;
use clap::Parser;
use config::{Config, LlmProvider};
use pipeline::{FileIntake, SummaryGenerator};
use ports::llm::LlmServicePort;
use ports::mail::MailTransportPort;
use ports::notification::{DeliveryMode, NotificationPort};
use std::sync::Arc;

/// Sender and subject applied to every outgoing summary email
#[derive(Clone, Debug)]
pub struct MailSettings {
    pub from: String,
    pub subject: String,
}

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<FileIntake>,
    /// `None` when the selected LLM provider has no API key
    pub summarizer: Option<Arc<SummaryGenerator>>,
    /// `None` when email delivery is not configured
    pub notifier: Option<Arc<dyn NotificationPort>>,
    pub mail: MailSettings,
}

/// Build the summary generator for the configured provider
fn build_summarizer(config: &Config) -> error::Result<Option<Arc<SummaryGenerator>>> {
    let Some(api_key) = config.llm_api_key() else {
        log::warn!(
            "No API key set for LLM provider {}; summary generation is disabled",
            config.llm_provider
        );
        return Ok(None);
    };

    let base_url = config.llm_base_url();
    let llm: Arc<dyn LlmServicePort> = match config.llm_provider {
        LlmProvider::Openai => {
            let service = OpenAIService::new(api_key, config.http_timeout())?;
            match base_url {
                Some(url) => Arc::new(service.with_base_url(url)),
                None => Arc::new(service),
            }
        }
        LlmProvider::Anthropic => {
            let service = AnthropicService::new(api_key, config.http_timeout())?;
            match base_url {
                Some(url) => Arc::new(service.with_base_url(url)),
                None => Arc::new(service),
            }
        }
    };

    let llm_config = config.llm_config();
    log::info!(
        "Summaries via {} using model {}",
        llm.provider_name(),
        llm_config.model
    );

    Ok(Some(Arc::new(SummaryGenerator::new(llm, llm_config))))
}

/// Build the notification dispatcher for the configured delivery mode
fn build_notifier(config: &Config) -> error::Result<Option<Arc<dyn NotificationPort>>> {
    let Some(api_key) = config.resend_api_key() else {
        log::warn!("RESEND_API_KEY is not set; email delivery is disabled");
        return Ok(None);
    };

    let transport: Arc<dyn MailTransportPort> = Arc::new(ResendService::new(
        &api_key,
        &config.resend_base_url,
        config.http_timeout(),
    )?);

    log::info!("Email delivery via {}", transport.provider_name());

    let notifier: Arc<dyn NotificationPort> = match config.delivery_mode {
        DeliveryMode::Redirect => {
            let Some(operator) = config.operator_email() else {
                log::warn!("Redirect mode requires OPERATOR_EMAIL; email delivery is disabled");
                return Ok(None);
            };
            let dispatcher = RedirectDispatcher::new(transport, operator);
            log::info!(
                "Redirect mode: all summary emails go to {}",
                dispatcher.operator()
            );
            Arc::new(dispatcher)
        }
        DeliveryMode::Direct => {
            log::info!("Direct mode: summary emails go to each recipient");
            Arc::new(DirectDispatcher::new(transport))
        }
    };

    Ok(Some(notifier))
}

/// Initialize the application
///
/// Creates the upload directory and wires adapters into the pipeline services.
fn initialize_app(config: &Config) -> error::Result<AppState> {
    let storage = TempDirStorage::new(config.upload_dir())?;
    log::info!("Storing uploads in {}", storage.dir().display());

    Ok(AppState {
        intake: Arc::new(FileIntake::new(Arc::new(storage))),
        summarizer: build_summarizer(config)?,
        notifier: build_notifier(config)?,
        mail: MailSettings {
            from: config.mail_from.clone(),
            subject: config.email_subject.clone(),
        },
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let state = initialize_app(&config)?;
    let app = api::router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    log::info!(
        "meeting-mailer {} listening on {}",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );

    api::serve(listener, app).await?;
    Ok(())
}
