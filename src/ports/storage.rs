/// Upload storage port trait
///
/// Defines the interface for the temporary on-disk copy of uploaded files.
/// Implementation: temp directory adapter
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Port trait for upload storage
#[async_trait]
pub trait UploadStoragePort: Send + Sync {
    /// Persist an upload under a collision-resistant name and return its location
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf>;

    /// Read a stored upload back
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Remove a stored upload
    async fn remove(&self, path: &Path) -> Result<()>;
}
