/// Notification dispatcher port trait
///
/// One capability, two strategies: redirect everything to an operator address, or
/// send directly to every recipient.
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Delivery strategy selected at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Send a single message to the operator address
    Redirect,
    /// Send one message per recipient
    Direct,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMode::Redirect => write!(f, "redirect"),
            DeliveryMode::Direct => write!(f, "direct"),
        }
    }
}

/// Message to dispatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Outcome of a successful dispatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    pub mode: DeliveryMode,
    /// Addresses mail was actually sent to
    pub delivered_to: Vec<String>,
    pub message_ids: Vec<String>,
}

/// Port trait for notification dispatch
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Send the message; errors are `AppError::Delivery`
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryResult>;

    fn mode(&self) -> DeliveryMode;
}
