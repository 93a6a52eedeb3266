//! POST /logout

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::AppError;
use crate::ocsf;
use crate::types::OkResponse;

/// Clear the session cookie. Succeeds whether or not a session existed.
pub async fn logout(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    // Best-effort, for the audit event only
    let email = state.sessions.read(&headers).into_payload().map(|p| p.email);

    let mut response = Json(OkResponse { ok: true }).into_response();
    state.sessions.destroy(response.headers_mut())?;

    ocsf::authentication_event(
        ocsf::ACTIVITY_LOGOFF,
        ocsf::STATUS_SUCCESS,
        ocsf::SEVERITY_INFORMATIONAL,
        email.as_deref(),
        "User logged out",
    );

    Ok(response)
}
