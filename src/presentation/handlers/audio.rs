use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::AudioPayload;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AudioRequest {
    #[serde(rename = "base64Audio")]
    pub base64_audio: Option<String>,
    pub prompt: Option<String>,
}

/// Body returned when no audio is attached and the prompt is answered
/// directly.
#[derive(Serialize)]
pub struct TextOnlyResponse {
    pub text: String,
}

#[derive(Serialize)]
pub struct AudioResponse {
    pub text: String,
    pub success: bool,
    #[serde(rename = "fileInfo")]
    pub file_info: FileInfo,
}

#[derive(Serialize)]
pub struct FileInfo {
    pub uri: String,
    pub state: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn audio_handler(
    State(state): State<AppState>,
    Json(request): Json<AudioRequest>,
) -> impl IntoResponse {
    let prompt = match request.prompt {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message("Prompt is required")),
            )
                .into_response();
        }
    };

    let encoded = match request.base64_audio {
        Some(encoded) if !encoded.is_empty() => encoded,
        _ => {
            tracing::debug!(
                prompt = %sanitize_prompt(&prompt),
                "No audio attached, answering text-only"
            );
            return match state.audio_pipeline.answer_text(&prompt).await {
                Ok(text) => (StatusCode::OK, Json(TextOnlyResponse { text })).into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Text-only request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse::message("Failed to process text request")),
                    )
                        .into_response()
                }
            };
        }
    };

    let payload = match AudioPayload::from_base64(&encoded) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Audio payload rejected");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to process audio",
                    &e,
                    state.settings.environment,
                )),
            )
                .into_response();
        }
    };

    tracing::info!(
        bytes = payload.len(),
        mime = payload.declared_mime().unwrap_or("unknown"),
        prompt = %sanitize_prompt(&prompt),
        "Processing audio request"
    );

    match state.audio_pipeline.answer_audio(&prompt, &payload).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AudioResponse {
                text: answer.text,
                success: true,
                file_info: FileInfo {
                    uri: answer.file_uri,
                    state: answer.file_state.as_str().to_string(),
                },
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Audio request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to process audio",
                    &e,
                    state.settings.environment,
                )),
            )
                .into_response()
        }
    }
}
