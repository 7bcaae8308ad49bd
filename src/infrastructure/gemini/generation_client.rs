use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerativeModel, GenerativeModelError};

/// Client for the Gemini `generateContent` REST endpoint.
///
/// The API key travels in the `x-goog-api-key` header rather than the query
/// string so request URIs can be logged without leaking it.
pub struct GeminiGenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiGenerationClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        model: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String, GenerativeModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerativeModelError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerativeModelError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerativeModelError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerativeModelError::InvalidResponse(format!("parse response: {}", e)))?;

        result
            .into_text()
            .ok_or_else(|| GenerativeModelError::InvalidResponse("no candidate text".to_string()))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    FileData { file_data: FileData },
}

#[derive(Serialize)]
struct FileData {
    file_uri: String,
    mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl GenerativeModel for GeminiGenerationClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerativeModelError> {
        let text = self
            .generate(vec![Part::Text {
                text: prompt.to_string(),
            }])
            .await?;
        tracing::debug!(chars = text.len(), "Gemini text generation completed");
        Ok(text)
    }

    async fn generate_with_file(
        &self,
        prompt: &str,
        file_uri: &str,
        mime_type: &str,
    ) -> Result<String, GenerativeModelError> {
        let text = self
            .generate(vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::FileData {
                    file_data: FileData {
                        file_uri: file_uri.to_string(),
                        mime_type: mime_type.to_string(),
                    },
                },
            ])
            .await?;
        tracing::debug!(chars = text.len(), "Gemini file-grounded generation completed");
        Ok(text)
    }
}
