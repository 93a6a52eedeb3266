//! Full-runtime session manager.
//!
//! Issues, clears and reads the session cookie through the request and
//! response header maps. Verification is the shared `TokenProtocol::read`
//! on the `Native` primitive set.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use std::sync::Arc;

use super::codec::SessionPayload;
use super::cookie::{CookieSettings, parse_cookie};
use super::primitives::Native;
use super::secret::Secret;
use super::token::{SessionOutcome, TokenProtocol, now_secs};
use crate::AppState;
use crate::error::AppError;

#[derive(Clone)]
pub struct SessionManager {
    protocol: TokenProtocol<Native>,
    cookie: CookieSettings,
    ttl_secs: u64,
}

impl SessionManager {
    pub fn new(secret: Secret, ttl_secs: u64, secure: bool) -> Self {
        Self {
            protocol: TokenProtocol::new(secret),
            cookie: CookieSettings::new(secure),
            ttl_secs,
        }
    }

    /// Sign a fresh token for an already-authenticated email and attach it
    /// to the outgoing response headers.
    pub fn issue(&self, response_headers: &mut HeaderMap, email: &str) -> Result<(), AppError> {
        let token = self.protocol.issue_at(email, self.ttl_secs, now_secs());
        append_set_cookie(response_headers, &self.cookie.make_set_cookie(&token))
    }

    /// Clear the cookie whether or not a session exists.
    pub fn destroy(&self, response_headers: &mut HeaderMap) -> Result<(), AppError> {
        append_set_cookie(response_headers, &self.cookie.make_delete_cookie())
    }

    /// Verify the session cookie carried by a request.
    pub fn read(&self, request_headers: &HeaderMap) -> SessionOutcome {
        self.protocol.read(self.find(request_headers))
    }

    /// Same as `read`, as of `now`.
    pub fn read_at(&self, request_headers: &HeaderMap, now: u64) -> SessionOutcome {
        self.protocol.read_at(self.find(request_headers), now)
    }

    fn find<'a>(&self, request_headers: &'a HeaderMap) -> Option<&'a str> {
        request_headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|line| parse_cookie(line, &self.cookie.name))
    }
}

fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) -> Result<(), AppError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::Internal(format!("invalid Set-Cookie value: {e}")))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}

/// The verified session of the current request.
///
/// Rejects with `NotAuthenticated` when the cookie is missing or does not
/// verify, without saying which.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionPayload);

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state
            .sessions
            .read(&parts.headers)
            .into_payload()
            .map(CurrentSession)
            .ok_or(AppError::NotAuthenticated)
    }
}
