use async_trait::async_trait;

use crate::domain::RemoteFile;

/// Remote storage for media files referenced by generation requests.
///
/// Uploaded files are processed asynchronously on the remote side; callers
/// re-query the state by resource name until it leaves `PROCESSING`.
#[async_trait]
pub trait MediaFileStore: Send + Sync {
    /// Uploads raw bytes and returns the stored file handle.
    async fn upload(
        &self,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, MediaFileStoreError>;

    /// Fetches the current state of a stored file by its resource name.
    async fn get(&self, name: &str) -> Result<RemoteFile, MediaFileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaFileStoreError {
    #[error("api key is not configured")]
    MissingApiKey,
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("file lookup failed: {0}")]
    LookupFailed(String),
}
