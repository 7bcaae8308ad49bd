use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::services::SpeechError;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TtsRequest {
    pub text: Option<String>,
    pub language: Option<String>,
}

/// Synthesizes speech for a text snippet. Success responses carry raw MP3
/// bytes rather than JSON.
#[tracing::instrument(skip(state, request))]
pub async fn tts_handler(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> impl IntoResponse {
    let (text, language) = match (request.text, request.language) {
        (Some(text), Some(language)) if !text.is_empty() && !language.is_empty() => {
            (text, language)
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message("Text and language are required")),
            )
                .into_response();
        }
    };

    match state.speech_service.speak(&text, &language).await {
        Ok(audio) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mp3")],
            audio,
        )
            .into_response(),
        Err(SpeechError::UnsupportedLanguage(code)) => {
            tracing::warn!(language = %code, "Unsupported TTS language");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message("Unsupported language")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Speech request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message("Failed to generate speech")),
            )
                .into_response()
        }
    }
}
