//! `POST /send-emails`

use crate::domain::email::{recipient_banner, render_email, TEST_MODE_NOTICE};
use crate::domain::models::{ActionItem, Recipient};
use crate::error::{AppError, Result};
use crate::ports::notification::{DeliveryMode, OutgoingMessage};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsRequest {
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsResponse {
    pub success: bool,
    pub message: String,
    pub mode: DeliveryMode,
    pub delivered_to: Vec<String>,
    pub intended_recipients: String,
    pub message_ids: Vec<String>,
}

/// Render the summary email and dispatch it
pub async fn send_emails(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendEmailsRequest>, JsonRejection>,
) -> Result<Json<SendEmailsResponse>> {
    let Json(request) = payload?;

    let notifier = state.notifier.as_ref().ok_or_else(|| {
        AppError::DispatchConfiguration(
            "set RESEND_API_KEY (and OPERATOR_EMAIL for redirect mode)".to_string(),
        )
    })?;

    if request.summary.trim().is_empty() {
        return Err(AppError::InvalidInput("summary is required".to_string()));
    }

    let mode = notifier.mode();
    let addresses: Vec<String> = request
        .recipients
        .iter()
        .filter_map(|r| {
            let address = r.address();
            if address.is_none() {
                log::warn!("Recipient without an email address: {}", r.display_name());
            }
            address.map(str::to_string)
        })
        .collect();

    if mode == DeliveryMode::Direct && addresses.is_empty() {
        return Err(AppError::InvalidInput(
            "No recipients with an email address were selected".to_string(),
        ));
    }

    let notice = (mode == DeliveryMode::Redirect).then_some(TEST_MODE_NOTICE);
    let document = render_email(
        &request.summary,
        &request.action_items,
        &request.recipients,
        notice,
    );

    let message = OutgoingMessage {
        from: state.mail.from.clone(),
        to: addresses,
        subject: state.mail.subject.clone(),
        html: document.into_string(),
    };

    let result = notifier.send(&message).await?;

    let summary_message = match mode {
        DeliveryMode::Redirect => format!(
            "Email sent to {} on behalf of {} intended recipient(s)",
            result.delivered_to.join(", "),
            request.recipients.len()
        ),
        DeliveryMode::Direct => {
            format!("Emails sent to {} recipient(s)", result.delivered_to.len())
        }
    };

    Ok(Json(SendEmailsResponse {
        success: true,
        message: summary_message,
        mode,
        delivered_to: result.delivered_to,
        intended_recipients: recipient_banner(&request.recipients),
        message_ids: result.message_ids,
    }))
}
