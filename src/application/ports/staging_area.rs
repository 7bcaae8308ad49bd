use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Request-scoped scratch storage for audio files handed to the transcoder
/// and the upload client. Files staged here must be removed before the
/// request finishes, on success and failure alike.
#[async_trait]
pub trait StagingArea: Send + Sync {
    /// Writes bytes to a fresh, uniquely named file and returns its path.
    async fn stage(&self, bytes: &[u8]) -> Result<PathBuf, StagingError>;

    /// Size of a staged file in bytes.
    async fn file_size(&self, path: &Path) -> Result<u64, StagingError>;

    /// Reads a staged file fully into memory.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StagingError>;

    /// Removes a staged file. A file that is already gone is not an error.
    async fn remove(&self, path: &Path) -> Result<(), StagingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("staged file not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
