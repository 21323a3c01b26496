//! Public updates endpoint.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::errors::AppError;
use crate::models::{ListQuery, UpdateList};
use crate::AppState;

/// Row cap applied when the caller supplies no usable limit.
pub const DEFAULT_LIMIT: i64 = 20;
/// Allowed range for the caller-supplied limit.
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;

/// GET /api/updates - List published updates, newest-published first.
///
/// Reachable without a token; the response is safe to cache briefly.
pub async fn list_published_updates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT);

    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::Validation(
            "Limit must be between 1 and 100".to_string(),
        ));
    }

    let updates = state.store.list_published(limit).await?;
    let count = updates.len();

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Json(UpdateList { updates, count }),
    ))
}
