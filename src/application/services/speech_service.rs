use std::sync::Arc;

use crate::application::ports::{SpeechSynthesizer, SpeechSynthesizerError};
use crate::domain::voice_for_language;

/// Resolves the voice for a language code and synthesizes speech through
/// the configured backend. Unknown codes are rejected before any remote
/// call is made.
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn speak(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let voice = voice_for_language(language)
            .ok_or_else(|| SpeechError::UnsupportedLanguage(language.to_string()))?;

        let audio = self
            .synthesizer
            .synthesize(text, &voice)
            .await
            .map_err(SpeechError::Synthesis)?;

        tracing::info!(
            language = language,
            voice = voice.voice_name,
            bytes = audio.len(),
            "Speech synthesized"
        );
        Ok(audio)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("synthesis: {0}")]
    Synthesis(SpeechSynthesizerError),
}
