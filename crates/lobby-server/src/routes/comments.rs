use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lobby_core::entities::Update;
use lobby_core::inputs::NewComment;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub admin_reply: String,
}

/// Responds with the parent update, comments included.
pub async fn create_handler(
    State(state): State<AppState>,
    Path(update_id): Path<String>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<Update>), ApiError> {
    let Json(new) = body?;
    let update = state.service.add_comment(&update_id, &new).await?;
    Ok((StatusCode::CREATED, Json(update)))
}

pub async fn reply_handler(
    State(state): State<AppState>,
    Path((update_id, comment_id)): Path<(String, String)>,
    body: Result<Json<ReplyRequest>, JsonRejection>,
) -> Result<Json<Update>, ApiError> {
    let Json(req) = body?;
    let update = state
        .service
        .add_admin_reply(&update_id, &comment_id, &req.admin_reply)
        .await?;
    Ok(Json(update))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path((update_id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_comment(&update_id, &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
