//! Admin updates endpoints.
//!
//! All handlers here sit behind the bearer-token middleware; a request only
//! reaches them with a valid token.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::db::{NewUpdate, ReplaceUpdate};
use crate::errors::AppError;
use crate::models::{
    CreateUpdateRequest, DeleteQuery, DeleteResponse, ReplaceUpdateRequest, Update, UpdateList,
    UpdateStatus,
};
use crate::AppState;

/// GET /api/admin/updates - List all updates regardless of status.
pub async fn list_all_updates(
    State(state): State<AppState>,
) -> Result<Json<UpdateList>, AppError> {
    let updates = state.store.list_all().await?;
    let count = updates.len();
    Ok(Json(UpdateList { updates, count }))
}

/// POST /api/admin/updates - Create a new update.
pub async fn create_update(
    State(state): State<AppState>,
    payload: Result<Json<CreateUpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request.validate()?;

    let created = state
        .store
        .create(NewUpdate {
            title: request.title,
            body: request.body,
            status: request.status.unwrap_or(UpdateStatus::Draft),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/admin/updates - Full-replace an existing update.
pub async fn replace_update(
    State(state): State<AppState>,
    payload: Result<Json<ReplaceUpdateRequest>, JsonRejection>,
) -> Result<Json<Update>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request.validate()?;

    let replaced = state
        .store
        .replace(
            request.id,
            ReplaceUpdate {
                title: request.title,
                body: request.body,
                status: request.status,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Update not found".to_string()))?;

    Ok(Json(replaced))
}

/// DELETE /api/admin/updates?id=<uuid> - Delete an update.
pub async fn delete_update(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id_param = query
        .id
        .ok_or_else(|| AppError::Validation("ID is required".to_string()))?;
    let id = Uuid::parse_str(&id_param)
        .map_err(|_| AppError::BadRequest("Invalid update id".to_string()))?;

    if !state.store.delete(id).await? {
        return Err(AppError::NotFound("Update not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "Update deleted successfully".to_string(),
    }))
}
