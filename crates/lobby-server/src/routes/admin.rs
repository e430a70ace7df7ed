use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use lobby_core::entities::AdminSession;
use lobby_core::errors::CoreError;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AdminSession>, ApiError> {
    let Json(req) = body?;
    match state.service.login(&req.password).await {
        Ok(session) => Ok(Json(session)),
        Err(CoreError::Unauthorized) => Err(ApiError::InvalidPassword),
        Err(other) => Err(other.into()),
    }
}

pub async fn logout_handler(State(state): State<AppState>) -> Result<Json<AdminSession>, ApiError> {
    Ok(Json(state.service.logout().await?))
}

pub async fn session_handler(
    State(state): State<AppState>,
) -> Result<Json<AdminSession>, ApiError> {
    Ok(Json(state.service.session().await?))
}
