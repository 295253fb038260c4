use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use chirp_types::api::MessageRequest;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

/// A missing message is still a 200, just with nothing in the body.
fn json_or_empty<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

pub async fn create_message(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<MessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = tokio::task::spawn_blocking(move || state.messages.create(&req)).await??;
    Ok(Json(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = tokio::task::spawn_blocking(move || state.messages.list_all()).await??;
    Ok(Json(messages))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = tokio::task::spawn_blocking(move || state.messages.get(message_id)).await??;
    Ok(json_or_empty(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = tokio::task::spawn_blocking(move || state.messages.delete(message_id)).await??;
    Ok(json_or_empty(deleted))
}

pub async fn patch_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    JsonBody(req): JsonBody<MessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = tokio::task::spawn_blocking(move || {
        state.messages.patch_text(message_id, &req.message_text)
    })
    .await??;
    Ok(Json(message))
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let messages =
        tokio::task::spawn_blocking(move || state.messages.list_by_account(account_id)).await??;
    Ok(Json(messages))
}
