//! Login request/response payloads.

use serde::{Deserialize, Serialize};

/// Request body for the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body carrying a freshly issued session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
