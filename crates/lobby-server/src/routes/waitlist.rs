use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lobby_core::entities::WaitlistEntry;
use serde::Deserialize;

use crate::error::ApiError;
use crate::mail::spawn_welcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

pub async fn join_handler(
    State(state): State<AppState>,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WaitlistEntry>), ApiError> {
    let Json(req) = body?;
    let entry = state.service.join_waitlist(&req.email).await?;
    spawn_welcome(&state, entry.email.clone());
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<WaitlistEntry>>, ApiError> {
    Ok(Json(state.service.list_waitlist().await?))
}

pub async fn feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<WaitlistEntry>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.service.set_feedback(&id, &req.feedback).await?))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_waitlist_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
