use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{ERR_MISSING_KEY, MAX_VALUE_SIZE_BYTES};
use crate::error::{AppError, Result};
use crate::middleware::AuthSession;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

/// Fetch the JSON value stored under a key; null when absent
pub async fn get_value(
    AuthSession(session): AuthSession,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    let value = state.db.kv_get(session.user_id, &key).await?;
    Ok(Json(value.unwrap_or(Value::Null)))
}

/// Store a JSON value under a key, overwriting any existing value
pub async fn set_value(
    AuthSession(session): AuthSession,
    State(state): State<AppState>,
    Json(payload): Json<SetValueRequest>,
) -> Result<Json<Value>> {
    if payload.key.is_empty() {
        return Err(AppError::Validation(ERR_MISSING_KEY.to_string()));
    }

    let serialized_size = payload.value.to_string().len();
    if serialized_size > MAX_VALUE_SIZE_BYTES {
        tracing::warn!(
            "Oversized value for user {} key {:?}: {} bytes",
            session.user_id,
            payload.key,
            serialized_size
        );
        return Err(AppError::PayloadTooLarge);
    }

    state
        .db
        .kv_set(session.user_id, &payload.key, &payload.value)
        .await?;

    Ok(Json(json!({ "status": "success" })))
}

/// Remove the value stored under a key; absent keys succeed quietly
pub async fn delete_value(
    AuthSession(session): AuthSession,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    state.db.kv_delete(session.user_id, &key).await?;
    Ok(Json(json!({ "status": "success" })))
}
