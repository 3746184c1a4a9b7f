//! Resend email API adapter
//!
//! Implements the MailTransportPort for Resend's transactional email API.

use crate::error::{AppError, Result};
use crate::ports::mail::{EmailEnvelope, MailTransportPort};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Resend API base URL used when `RESEND_BASE_URL` is not set.
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Resend API client for sending transactional emails
pub struct ResendService {
    client: Client,
    base_url: String,
}

/// Request payload for sending an email via Resend
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// Response from Resend API
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl ResendService {
    /// Create a new Resend client with authentication
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| {
                AppError::DispatchConfiguration(format!("Invalid Resend API key: {}", e))
            })?;
        auth_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_header);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MailTransportPort for ResendService {
    async fn deliver(&self, envelope: &EmailEnvelope) -> Result<String> {
        let request = SendEmailRequest {
            from: &envelope.from,
            to: &envelope.to,
            subject: &envelope.subject,
            html: &envelope.html,
        };

        log::info!("Sending email to {} recipient(s)", envelope.to.len());
        log::debug!("Email subject: {}", envelope.subject);

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Failed to send email request: {e:?}");
                AppError::Delivery(format!("Email request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.message)
                .unwrap_or(error_text);
            log::warn!("Failed to send email: {} - {}", status, message);
            return Err(AppError::Delivery(format!("{} ({})", message, status)));
        }

        let sent: SendEmailResponse = response.json().await.map_err(|e| {
            AppError::Delivery(format!("Failed to parse email API response: {}", e))
        })?;

        log::info!("Email sent successfully, message_id: {}", sent.id);
        Ok(sent.id)
    }

    fn provider_name(&self) -> &str {
        "resend"
    }
}
