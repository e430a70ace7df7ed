use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lobby_core::entities::Update;
use lobby_core::events::ServerEvent;
use lobby_core::inputs::NewUpdate;
use lobby_db::UpdatePatch;

use crate::error::ApiError;
use crate::mail::spawn_update_notifications;
use crate::state::AppState;

pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<NewUpdate>, JsonRejection>,
) -> Result<(StatusCode, Json<Update>), ApiError> {
    let Json(new) = body?;
    let update = state.service.post_update(&new).await?;
    state.broadcast(ServerEvent::UpdatePosted(update.clone()));
    spawn_update_notifications(&state, update.clone());
    Ok((StatusCode::CREATED, Json(update)))
}

pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Update>>, ApiError> {
    Ok(Json(state.service.list_updates().await?))
}

pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Update>, ApiError> {
    Ok(Json(state.service.get_update(&id).await?))
}

pub async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePatch>, JsonRejection>,
) -> Result<Json<Update>, ApiError> {
    let Json(patch) = body?;
    Ok(Json(state.service.edit_update(&id, &patch).await?))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_update(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
