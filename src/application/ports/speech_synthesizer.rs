use async_trait::async_trait;

use crate::domain::VoiceSpec;

/// Text-to-speech synthesis backed by a remote voice service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders the text as MP3 audio using the given voice.
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSpec,
    ) -> Result<Vec<u8>, SpeechSynthesizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesizerError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
