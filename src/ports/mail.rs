/// Mail transport port trait
///
/// Defines the interface for the external email-sending API.
/// Implementation: Resend
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One email as handed to the transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailEnvelope {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Port trait for email transports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransportPort: Send + Sync {
    /// Deliver one email, returning the provider's message id
    async fn deliver(&self, envelope: &EmailEnvelope) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
