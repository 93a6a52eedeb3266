//! Shared request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::credentials::Role;

/// POST /login request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// POST /login success response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub role: Role,
    pub redirect: String,
}

/// GET /login query string.
#[derive(Debug, Default, Deserialize)]
pub struct LoginEntryParams {
    pub next: Option<String>,
}

/// GET /login response: where to post credentials and where to go after.
#[derive(Debug, Serialize)]
pub struct LoginEntryResponse {
    pub login: String,
    pub next: String,
}

/// GET /admin response.
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub email: String,
    pub expires_at: u64,
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
