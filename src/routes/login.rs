//! GET /login, POST /login

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::credentials::LoginOutcome;
use crate::error::AppError;
use crate::ocsf;
use crate::types::{LoginEntryParams, LoginEntryResponse, LoginRequest, LoginResponse};

/// Login entry point the access gate redirects to.
pub async fn login_entry(
    State(state): State<Arc<crate::AppState>>,
    Query(params): Query<LoginEntryParams>,
) -> Json<LoginEntryResponse> {
    Json(LoginEntryResponse {
        login: format!("POST {}", state.config.login_path),
        next: safe_next(params.next.as_deref(), &state.config.protected_prefix),
    })
}

/// Check credentials and, on success, issue a fresh session cookie.
///
/// A body that is not valid JSON counts as empty credentials.
pub async fn login(
    State(state): State<Arc<crate::AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: LoginRequest = serde_json::from_slice(&body).unwrap_or_default();

    match state
        .credentials
        .verify_login(&request.email, &request.password)
    {
        LoginOutcome::Accepted { email, role } => {
            let redirect = safe_next(request.next.as_deref(), &state.config.protected_prefix);
            let mut response = Json(LoginResponse {
                ok: true,
                role,
                redirect,
            })
            .into_response();
            state.sessions.issue(response.headers_mut(), &email)?;

            ocsf::authentication_event(
                ocsf::ACTIVITY_LOGON,
                ocsf::STATUS_SUCCESS,
                ocsf::SEVERITY_INFORMATIONAL,
                Some(&email),
                "Session issued after credential check",
            );
            Ok(response)
        }
        LoginOutcome::Rejected { reason } => {
            ocsf::authentication_event(
                ocsf::ACTIVITY_LOGON,
                ocsf::STATUS_FAILURE,
                ocsf::SEVERITY_MEDIUM,
                None,
                &format!("Credential check failed: {reason}"),
            );
            Err(AppError::LoginFailed(reason))
        }
    }
}

/// Accept only local absolute paths as a post-login target.
pub fn safe_next(next: Option<&str>, fallback: &str) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}
