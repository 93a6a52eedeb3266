//! GET /admin, GET /admin/{*rest}

use axum::Json;

use crate::session::CurrentSession;
use crate::types::AdminResponse;

/// Dashboard data for the signed-in principal.
///
/// The access gate has already let this request through; the handler reads
/// the session again through the full-runtime manager.
pub async fn dashboard(CurrentSession(session): CurrentSession) -> Json<AdminResponse> {
    Json(AdminResponse {
        email: session.email,
        expires_at: session.expires_at,
    })
}
