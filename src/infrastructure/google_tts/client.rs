use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechSynthesizer, SpeechSynthesizerError};
use crate::domain::VoiceSpec;

const SSML_GENDER: &str = "FEMALE";
const AUDIO_ENCODING: &str = "MP3";

/// Client for the Google Cloud Text-to-Speech REST endpoint. The response
/// carries the rendered audio as base64, decoded here before returning.
pub struct GoogleTtsClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn super::TokenSource>,
}

impl GoogleTtsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://texttospeech.googleapis.com";

    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn super::TokenSource>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSpec,
    ) -> Result<Vec<u8>, SpeechSynthesizerError> {
        let token = self.tokens.bearer_token().await?;

        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: voice.language_code,
                name: voice.voice_name,
                ssml_gender: SSML_GENDER,
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING,
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechSynthesizerError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechSynthesizerError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechSynthesizerError::InvalidResponse(format!("parse response: {}", e)))?;

        STANDARD.decode(result.audio_content.as_bytes()).map_err(|e| {
            SpeechSynthesizerError::InvalidResponse(format!("decode audio content: {}", e))
        })
    }
}
