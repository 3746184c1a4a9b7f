/// Temporary directory storage adapter
///
/// Implements UploadStoragePort by writing uploads into a scratch directory.
use crate::error::Result;
use crate::ports::storage::UploadStoragePort;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Upload storage backed by a directory on local disk
pub struct TempDirStorage {
    dir: PathBuf,
}

impl TempDirStorage {
    /// Create the storage, creating the directory if it doesn't exist
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<unix millis>-<name>` with path separators and other unsafe characters replaced
    fn stored_name(original_name: &str) -> String {
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");

        let sanitized: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitized.trim_start_matches('.')
        )
    }
}

#[async_trait]
impl UploadStoragePort for TempDirStorage {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let mut path = self.dir.join(Self::stored_name(original_name));

        // Two uploads with the same name in the same millisecond
        let mut attempt = 1;
        while tokio::fs::try_exists(&path).await? {
            path = self
                .dir
                .join(format!("{}-{}", attempt, Self::stored_name(original_name)));
            attempt += 1;
        }

        tokio::fs::write(&path, bytes).await?;
        log::debug!("Stored upload {} at {}", original_name, path.display());
        Ok(path)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}
