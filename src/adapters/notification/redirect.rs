//! Redirect dispatcher
//!
//! Sends a single message to a fixed operator address regardless of the requested
//! recipients. The intended recipients are only visible in the rendered body.

use crate::error::{AppError, Result};
use crate::ports::mail::{EmailEnvelope, MailTransportPort};
use crate::ports::notification::{DeliveryMode, DeliveryResult, NotificationPort, OutgoingMessage};
use async_trait::async_trait;
use std::sync::Arc;

pub struct RedirectDispatcher {
    transport: Arc<dyn MailTransportPort>,
    operator: String,
}

impl RedirectDispatcher {
    pub fn new(transport: Arc<dyn MailTransportPort>, operator: String) -> Self {
        Self {
            transport,
            operator,
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }
}

#[async_trait]
impl NotificationPort for RedirectDispatcher {
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryResult> {
        log::info!(
            "Redirecting email for {} intended recipient(s) to {}",
            message.to.len(),
            self.operator
        );

        let envelope = EmailEnvelope {
            from: message.from.clone(),
            to: vec![self.operator.clone()],
            subject: message.subject.clone(),
            html: message.html.clone(),
        };

        let message_id = self.transport.deliver(&envelope).await.map_err(|e| match e {
            AppError::Delivery(msg) => {
                AppError::Delivery(format!("Failed to send to {}: {}", self.operator, msg))
            }
            other => other,
        })?;

        Ok(DeliveryResult {
            mode: DeliveryMode::Redirect,
            delivered_to: vec![self.operator.clone()],
            message_ids: vec![message_id],
        })
    }

    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Redirect
    }
}
