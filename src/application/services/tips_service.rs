use std::sync::Arc;

use crate::application::ports::{GenerativeModel, GenerativeModelError};
use crate::domain::{TipsParseError, TipsPayload, parse_tips_response};

/// Generates structured wellness tips: one model call, then strict parsing
/// of the expected two-block response.
pub struct TipsService {
    model: Arc<dyn GenerativeModel>,
}

impl TipsService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, prompt: &str) -> Result<TipsPayload, TipsError> {
        let raw = self
            .model
            .generate_text(prompt)
            .await
            .map_err(TipsError::Generation)?;

        let payload = parse_tips_response(&raw)?;
        tracing::info!(videos = payload.youtube.len(), "Tips response parsed");
        Ok(payload)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TipsError {
    #[error("generation: {0}")]
    Generation(GenerativeModelError),
    #[error(transparent)]
    Format(#[from] TipsParseError),
}
