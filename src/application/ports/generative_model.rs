use async_trait::async_trait;

/// A generative language model that answers a text prompt, optionally
/// grounded in a previously uploaded media file.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerativeModelError>;

    async fn generate_with_file(
        &self,
        prompt: &str,
        file_uri: &str,
        mime_type: &str,
    ) -> Result<String, GenerativeModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerativeModelError {
    #[error("api key is not configured")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
