use axum::{Json, extract::State, response::IntoResponse};

use chirp_types::api::AccountRequest;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = tokio::task::spawn_blocking(move || state.accounts.register(&req)).await??;
    Ok(Json(account))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = tokio::task::spawn_blocking(move || state.accounts.login(&req)).await??;
    Ok(Json(account))
}
