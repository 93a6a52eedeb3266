//! Application error types with Axum response mapping.
//!
//! Session verification failures all surface as `NotAuthenticated` with the
//! same body; the reason a token was refused is never sent to the client.
//! Credential-check failures do carry a human-readable reason.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            AppError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({"ok": false, "message": "Not authenticated"}),
            ),
            AppError::LoginFailed(reason) => (
                StatusCode::UNAUTHORIZED,
                json!({"ok": false, "message": reason}),
            ),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"ok": false, "message": "Internal error"}),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, axum::Json(body)).into_response()
    }
}
