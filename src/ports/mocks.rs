//! Mock implementations for testing

use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};
use crate::ports::mail::{EmailEnvelope, MailTransportPort};
use crate::ports::storage::UploadStoragePort;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scripted LLM: returns a fixed response (or error) and records every request
#[derive(Clone)]
pub struct MockLlm {
    response: std::result::Result<String, String>,
    json_mode: bool,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlm {
    pub fn replying(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            json_mode: true,
            requests: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            json_mode: true,
            requests: Arc::default(),
        }
    }

    pub fn without_json_mode(mut self) -> Self {
        self.json_mode = false;
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmServicePort for MockLlm {
    async fn complete(&self, request: &CompletionRequest, _config: &LlmConfig) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.response
            .clone()
            .map_err(AppError::SummaryGeneration)
    }

    fn supports_json_mode(&self) -> bool {
        self.json_mode
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// In-memory upload storage
#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    fail_writes: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn stored_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl UploadStoragePort for MockStorage {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if self.fail_writes {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "disk is read-only",
            )));
        }

        let mut files = self.files.lock().unwrap();
        let path = PathBuf::from(format!("/mock/{}-{}", files.len(), original_name));
        files.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not stored", path.display()),
                ))
            })
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Transport that records every envelope and fails for chosen addresses
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<EmailEnvelope>>>,
    failing_addresses: Vec<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            failing_addresses: addresses.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransportPort for RecordingTransport {
    async fn deliver(&self, envelope: &EmailEnvelope) -> Result<String> {
        if let Some(address) = envelope
            .to
            .iter()
            .find(|to| self.failing_addresses.contains(to))
        {
            return Err(AppError::Delivery(format!("mailbox {} rejected", address)));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(envelope.clone());
        Ok(format!("msg-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}
