//! Direct dispatcher
//!
//! Sends one message per recipient, in order. The first failure stops the loop;
//! messages already sent stay sent.

use crate::error::{AppError, Result};
use crate::ports::mail::{EmailEnvelope, MailTransportPort};
use crate::ports::notification::{DeliveryMode, DeliveryResult, NotificationPort, OutgoingMessage};
use async_trait::async_trait;
use std::sync::Arc;

pub struct DirectDispatcher {
    transport: Arc<dyn MailTransportPort>,
}

impl DirectDispatcher {
    pub fn new(transport: Arc<dyn MailTransportPort>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl NotificationPort for DirectDispatcher {
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryResult> {
        let mut delivered_to = Vec::with_capacity(message.to.len());
        let mut message_ids = Vec::with_capacity(message.to.len());

        for address in &message.to {
            let envelope = EmailEnvelope {
                from: message.from.clone(),
                to: vec![address.clone()],
                subject: message.subject.clone(),
                html: message.html.clone(),
            };

            let message_id = self.transport.deliver(&envelope).await.map_err(|e| {
                log::warn!(
                    "Stopping after {} of {} deliveries: {} failed",
                    delivered_to.len(),
                    message.to.len(),
                    address
                );
                let reason = match e {
                    AppError::Delivery(msg) => msg,
                    other => other.to_string(),
                };
                AppError::Delivery(format!("Failed to send to {}: {}", address, reason))
            })?;

            delivered_to.push(address.clone());
            message_ids.push(message_id);
        }

        log::info!("Delivered {} email(s) directly", delivered_to.len());

        Ok(DeliveryResult {
            mode: DeliveryMode::Direct,
            delivered_to,
            message_ids,
        })
    }

    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Direct
    }
}
