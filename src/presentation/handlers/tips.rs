use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::json_truthy;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TipsRequest {
    pub prompt: Option<String>,
    /// Client-side assessment answers. Required to be present and non-empty,
    /// but the prompt text is what actually reaches the model; clients bake
    /// the assessment into it.
    pub assessment: Option<Value>,
}

#[derive(Serialize)]
pub struct TipsResponse {
    pub tips: Value,
    pub youtube: Vec<Value>,
    pub success: bool,
}

#[tracing::instrument(skip(state, request))]
pub async fn tips_handler(
    State(state): State<AppState>,
    Json(request): Json<TipsRequest>,
) -> impl IntoResponse {
    let assessment_present = request.assessment.as_ref().is_some_and(json_truthy);
    let prompt = match request.prompt {
        Some(prompt) if !prompt.is_empty() && assessment_present => prompt,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message("Prompt and assessment are required")),
            )
                .into_response();
        }
    };

    tracing::debug!(prompt = %sanitize_prompt(&prompt), "Generating tips");

    match state.tips_service.generate(&prompt).await {
        Ok(payload) => (
            StatusCode::OK,
            Json(TipsResponse {
                tips: payload.tips,
                youtube: payload.youtube,
                success: true,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Tips request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to generate tips",
                    &e,
                    state.settings.environment,
                )),
            )
                .into_response()
        }
    }
}
