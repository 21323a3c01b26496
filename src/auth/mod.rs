//! Token-based authentication module.
//!
//! Issues HMAC-signed session tokens at login and guards the admin routes
//! with a bearer-token middleware. Credential comparison is constant-time to
//! mitigate timing attacks.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Required scheme prefix on the Authorization header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Session token validity window.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Minimum time the login endpoint takes to answer, whatever the outcome.
pub const LOGIN_DELAY: std::time::Duration = std::time::Duration::from_millis(100);

/// Claims embedded in a session token. The server keeps no session state;
/// the token is the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a signed session token for the given username.
pub fn issue_token(username: &str, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        username: username.to_string(),
        role: "admin".to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Extract and verify the bearer token from request headers.
///
/// Every failure maps to the same generic unauthorized error so callers
/// cannot distinguish a missing header from a bad signature.
pub fn verify_token(headers: &header::HeaderMap, secret: &str) -> Result<Claims, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    Ok(data.claims)
}

/// Bearer-token middleware for the admin routes.
///
/// Any verification failure short-circuits before the request can reach a
/// handler, so no store operation happens without a valid token.
pub async fn jwt_auth_layer(
    jwt_secret: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(secret) = jwt_secret else {
        // Unconfigured key still answers 401; the cause stays server-side.
        tracing::error!("JWT_SECRET is not configured; rejecting admin request");
        return AppError::Unauthorized("Unauthorized".to_string()).into_response();
    };

    match verify_token(request.headers(), &secret) {
        Ok(_claims) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    const SECRET: &str = "test-signing-key";

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let token = issue_token("admin", SECRET).unwrap();
        let claims = verify_token(&bearer_headers(&token), SECRET).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token("admin", SECRET).unwrap();
        assert!(verify_token(&bearer_headers(&token), "other-key").is_err());
    }

    #[test]
    fn test_verify_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(verify_token(&headers, SECRET).is_err());
    }

    #[test]
    fn test_verify_rejects_non_bearer_scheme() {
        let token = issue_token("admin", SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Token {}", token).parse().unwrap(),
        );
        assert!(verify_token(&headers, SECRET).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            username: "admin".to_string(),
            role: "admin".to_string(),
            iat: (now - chrono::Duration::hours(25)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&bearer_headers(&token), SECRET).is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hunter2", "hunter2"));
        assert!(!constant_time_compare("hunter2", "hunter3"));
        assert!(!constant_time_compare("short", "much-longer-value"));
        assert!(constant_time_compare("", ""));
    }
}
