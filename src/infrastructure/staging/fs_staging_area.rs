use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{StagingArea, StagingError};

/// Local filesystem staging for request-scoped audio files.
///
/// Files get a fresh UUID-based name per request, so concurrent requests
/// never collide and cleanup can target exactly the files one request
/// created. The directory is re-created on demand in case it was removed
/// while the gateway was running.
pub struct FsStagingArea {
    base_dir: PathBuf,
}

impl FsStagingArea {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl StagingArea for FsStagingArea {
    async fn stage(&self, bytes: &[u8]) -> Result<PathBuf, StagingError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let path = self.base_dir.join(format!("audio_{}.mp3", Uuid::new_v4()));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    async fn file_size(&self, path: &Path) -> Result<u64, StagingError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StagingError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(StagingError::Io(e)),
        }
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, StagingError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StagingError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(StagingError::Io(e)),
        }
    }

    async fn remove(&self, path: &Path) -> Result<(), StagingError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingError::Io(e)),
        }
    }
}
