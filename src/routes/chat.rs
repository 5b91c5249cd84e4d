use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::AuthSession;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub system_context: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Relay a single-turn chat to the configured AI provider
///
/// Fails with 500 when no provider credential is configured.
pub async fn chat(
    AuthSession(_session): AuthSession,
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let client = state.gemini.as_ref().ok_or(AppError::ServiceUnavailable)?;
    let response = client
        .generate(&payload.system_context, &payload.message)
        .await?;
    Ok(Json(ChatResponse { response }))
}
