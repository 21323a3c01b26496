//! Login endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::auth::{self, constant_time_compare, LOGIN_DELAY};
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse};
use crate::AppState;

/// POST /api/login - Validate admin credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) =
        payload.map_err(|_| AppError::BadRequest("Invalid request".to_string()))?;

    let (Some(admin_user), Some(admin_password), Some(jwt_secret)) = (
        state.config.admin_user.as_deref(),
        state.config.admin_password.as_deref(),
        state.config.jwt_secret.as_deref(),
    ) else {
        return Err(AppError::Config(
            "ADMIN_USER, ADMIN_PASSWORD, or JWT_SECRET is not set".to_string(),
        ));
    };

    // Both comparisons always run; no early exit on a username mismatch.
    let username_ok = constant_time_compare(&request.username, admin_user);
    let password_ok = constant_time_compare(&request.password, admin_password);

    // Fixed response-time floor for every credential-dependent outcome.
    tokio::time::sleep(LOGIN_DELAY).await;

    if !(username_ok & password_ok) {
        // Never reveals which field was wrong.
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = auth::issue_token(admin_user, jwt_secret)?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(LoginResponse { token }),
    ))
}
