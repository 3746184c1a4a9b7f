//! File intake
//!
//! Classifies an upload batch, stores each accepted file temporarily and extracts
//! its content.

use crate::domain::contacts::parse_contacts;
use crate::domain::models::{FileKind, UploadedFile};
use crate::error::{AppError, Result};
use crate::ports::storage::UploadStoragePort;
use std::path::PathBuf;
use std::sync::Arc;

/// Maximum number of files accepted in one batch
pub const MAX_FILES_PER_BATCH: usize = 10;

/// A raw uploaded file
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of processing a batch
#[derive(Debug)]
pub struct IntakeOutcome {
    pub files: Vec<UploadedFile>,
    /// Temporary copies the caller is expected to clean up
    pub stored: Vec<PathBuf>,
}

pub struct FileIntake {
    storage: Arc<dyn UploadStoragePort>,
}

impl FileIntake {
    pub fn new(storage: Arc<dyn UploadStoragePort>) -> Self {
        Self { storage }
    }

    /// Process a batch of uploads
    ///
    /// Files with an unrecognized extension are skipped. A storage failure fails
    /// the whole batch; files stored before the failure are removed.
    pub async fn process(&self, batch: Vec<IncomingFile>) -> Result<IntakeOutcome> {
        if batch.len() > MAX_FILES_PER_BATCH {
            return Err(AppError::InvalidInput(format!(
                "Too many files: {} uploaded, at most {} allowed",
                batch.len(),
                MAX_FILES_PER_BATCH
            )));
        }

        let mut outcome = IntakeOutcome {
            files: Vec::with_capacity(batch.len()),
            stored: Vec::with_capacity(batch.len()),
        };

        for file in batch {
            let Some(kind) = FileKind::from_file_name(&file.name) else {
                log::info!("Skipping unsupported upload: {}", file.name);
                continue;
            };

            match self.ingest(file, kind, &mut outcome.stored).await {
                Ok(uploaded) => outcome.files.push(uploaded),
                Err(e) => {
                    self.cleanup(&outcome.stored).await;
                    return Err(e);
                }
            }
        }

        log::info!("Processed {} uploaded file(s)", outcome.files.len());
        Ok(outcome)
    }

    async fn ingest(
        &self,
        file: IncomingFile,
        kind: FileKind,
        stored: &mut Vec<PathBuf>,
    ) -> Result<UploadedFile> {
        let path = self
            .storage
            .save(&file.name, &file.bytes)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to store {}: {}", file.name, e)))?;
        stored.push(path.clone());

        let bytes = self
            .storage
            .read(&path)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to read {}: {}", file.name, e)))?;

        match kind {
            FileKind::Transcript => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                log::debug!("Transcript {} has {} characters", file.name, text.len());
                Ok(UploadedFile::transcript(file.name, text))
            }
            FileKind::ContactList => {
                let contacts = parse_contacts(&bytes)?;
                log::debug!("Contact list {} has {} rows", file.name, contacts.len());
                Ok(UploadedFile::contacts(file.name, contacts))
            }
        }
    }

    /// Best-effort removal of stored copies
    pub async fn cleanup(&self, stored: &[PathBuf]) {
        for path in stored {
            if let Err(e) = self.storage.remove(path).await {
                log::warn!("Failed to remove temporary upload {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::TempDirStorage;
    use crate::domain::models::FilePayload;
    use crate::ports::mocks::MockStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_transcript_and_contacts_are_classified() {
        let dir = tempdir().unwrap();
        let intake = FileIntake::new(Arc::new(TempDirStorage::new(dir.path().into()).unwrap()));

        let outcome = intake
            .process(vec![
                IncomingFile::new("meeting.txt", "Alice: hi\nBob: hello"),
                IncomingFile::new("team.CSV", "name,email\nAlice,alice@example.com\n"),
            ])
            .await
            .unwrap();

        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.files[0].kind, FileKind::Transcript);
        assert_eq!(
            outcome.files[0].payload,
            FilePayload::Text("Alice: hi\nBob: hello".to_string())
        );
        assert_eq!(outcome.files[1].kind, FileKind::ContactList);
        match &outcome.files[1].payload {
            FilePayload::Contacts(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].email(), Some("alice@example.com"));
            }
            other => panic!("expected contacts, got {:?}", other),
        }

        assert_eq!(outcome.stored.len(), 2);
        assert!(outcome.stored.iter().all(|p| p.exists()));

        intake.cleanup(&outcome.stored).await;
        assert!(outcome.stored.iter().all(|p| !p.exists()));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_skipped() {
        let storage = MockStorage::new();
        let intake = FileIntake::new(Arc::new(storage.clone()));

        let outcome = intake
            .process(vec![
                IncomingFile::new("slides.pdf", vec![0x25, 0x50, 0x44, 0x46]),
                IncomingFile::new("notes.txt", "hello"),
            ])
            .await
            .unwrap();

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.files[0].name, "notes.txt");
        assert_eq!(storage.stored_count(), 1);
    }

    #[tokio::test]
    async fn test_only_unknown_files_gives_empty_result() {
        let intake = FileIntake::new(Arc::new(MockStorage::new()));
        let outcome = intake
            .process(vec![IncomingFile::new("image.png", vec![1, 2, 3])])
            .await
            .unwrap();
        assert!(outcome.files.is_empty());
        assert!(outcome.stored.is_empty());
    }

    #[tokio::test]
    async fn test_batch_limit() {
        let intake = FileIntake::new(Arc::new(MockStorage::new()));
        let batch = (0..=MAX_FILES_PER_BATCH)
            .map(|i| IncomingFile::new(format!("{}.txt", i), "x"))
            .collect();

        let result = intake.process(batch).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_fails_batch() {
        let intake = FileIntake::new(Arc::new(MockStorage::failing()));
        let result = intake
            .process(vec![IncomingFile::new("notes.txt", "hello")])
            .await;

        assert!(matches!(result, Err(AppError::Upload(_))));
    }

    #[tokio::test]
    async fn test_invalid_utf8_transcript_is_decoded_lossily() {
        let intake = FileIntake::new(Arc::new(MockStorage::new()));
        let outcome = intake
            .process(vec![IncomingFile::new("notes.txt", vec![b'h', b'i', 0xff])])
            .await
            .unwrap();

        assert_eq!(
            outcome.files[0].payload,
            FilePayload::Text("hi\u{fffd}".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_csv_fails_and_cleans_up() {
        let storage = MockStorage::new();
        let intake = FileIntake::new(Arc::new(storage.clone()));

        let result = intake
            .process(vec![
                IncomingFile::new("notes.txt", "hello"),
                IncomingFile::new("contacts.csv", ""),
            ])
            .await;

        assert!(matches!(result, Err(AppError::Parse(_))));
        assert_eq!(storage.stored_count(), 0);
    }
}
