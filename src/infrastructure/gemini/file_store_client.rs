use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MediaFileStore, MediaFileStoreError};
use crate::domain::{RemoteFile, RemoteFileState};

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Client for the Gemini file store using the resumable upload protocol:
/// a start request yields a session URL, a second request sends the bytes
/// and finalizes in one step.
pub struct GeminiFileStoreClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiFileStoreClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, MediaFileStoreError> {
        self.api_key
            .as_deref()
            .ok_or(MediaFileStoreError::MissingApiKey)
    }

    async fn start_upload_session(
        &self,
        api_key: &str,
        total_bytes: usize,
        mime_type: &str,
        display_name: &str,
    ) -> Result<String, MediaFileStoreError> {
        let body = StartUploadRequest {
            file: FileMetadata {
                display_name: display_name.to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header("x-goog-api-key", api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", total_bytes)
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&body)
            .send()
            .await
            .map_err(|e| MediaFileStoreError::UploadFailed(format!("start request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MediaFileStoreError::UploadFailed(format!(
                "start status {}: {}",
                status, body
            )));
        }

        response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                MediaFileStoreError::UploadFailed("no upload session url in response".to_string())
            })
    }
}

#[derive(Serialize)]
struct StartUploadRequest {
    file: FileMetadata,
}

#[derive(Serialize)]
struct FileMetadata {
    display_name: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: FileResource,
}

#[derive(Deserialize)]
struct FileResource {
    name: String,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<FileStatus>,
}

#[derive(Deserialize)]
struct FileStatus {
    #[serde(default)]
    message: Option<String>,
}

impl FileResource {
    fn into_remote_file(self) -> RemoteFile {
        let state = match self.state.as_deref() {
            Some(raw) => RemoteFileState::from_str(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Unrecognized remote file state");
                RemoteFileState::Unspecified
            }),
            None => RemoteFileState::Unspecified,
        };

        RemoteFile {
            name: self.name,
            uri: self.uri.unwrap_or_default(),
            state,
            error_message: self.error.and_then(|e| e.message),
        }
    }
}

#[async_trait]
impl MediaFileStore for GeminiFileStoreClient {
    async fn upload(
        &self,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, MediaFileStoreError> {
        let api_key = self.api_key()?;

        let upload_url = self
            .start_upload_session(api_key, data.len(), mime_type, display_name)
            .await?;

        let response = self
            .client
            .post(&upload_url)
            .header("x-goog-api-key", api_key)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| MediaFileStoreError::UploadFailed(format!("upload request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MediaFileStoreError::UploadFailed(format!(
                "upload status {}: {}",
                status, body
            )));
        }

        let result: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaFileStoreError::UploadFailed(format!("parse response: {}", e)))?;

        Ok(result.file.into_remote_file())
    }

    async fn get(&self, name: &str) -> Result<RemoteFile, MediaFileStoreError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/v1beta/{}", self.base_url, name))
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| MediaFileStoreError::LookupFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MediaFileStoreError::LookupFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let resource: FileResource = response
            .json()
            .await
            .map_err(|e| MediaFileStoreError::LookupFailed(format!("parse response: {}", e)))?;

        Ok(resource.into_remote_file())
    }
}
