//! Access gate for the protected path prefix.
//!
//! Runs on every request, so it stays a pure local computation: cookie
//! string matching plus HMAC verification through the edge verifier. It
//! reads the session cookie but never writes it.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::ocsf;
use crate::session::cookie::joined_cookie_header;
use crate::session::token::now_secs;
use crate::session::{EdgeVerifier, Secret};

/// Query parameter carrying the originally requested path.
pub const NEXT_PARAM: &str = "next";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

#[derive(Clone)]
pub struct AccessGate {
    verifier: EdgeVerifier,
    protected_prefix: String,
    login_path: String,
}

impl AccessGate {
    pub fn new(secret: Secret, protected_prefix: &str, login_path: &str) -> Self {
        Self {
            verifier: EdgeVerifier::new(secret),
            protected_prefix: protected_prefix.trim_end_matches('/').to_string(),
            login_path: login_path.to_string(),
        }
    }

    /// Segment-aware prefix match; the login entry point is never gated.
    pub fn is_protected(&self, path: &str) -> bool {
        if path == self.login_path {
            return false;
        }
        let prefix = self.protected_prefix.as_str();
        if prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn decide(&self, path: &str, cookie_header: Option<&str>, now: u64) -> GateDecision {
        if !self.is_protected(path) {
            return GateDecision::Allow;
        }
        if self.verifier.read_at(cookie_header, now).is_authenticated() {
            GateDecision::Allow
        } else {
            GateDecision::Redirect(self.login_redirect(path))
        }
    }

    pub fn login_redirect(&self, path: &str) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            NEXT_PARAM,
            urlencoding::encode(path)
        )
    }
}

/// Axum middleware: pass through or redirect to the login entry point.
pub async fn access_gate(gate: Arc<AccessGate>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let cookie_header = joined_cookie_header(req.headers());

    match gate.decide(&path, cookie_header.as_deref(), now_secs()) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Redirect(location) => {
            ocsf::access_denied_event(&path);
            Redirect::temporary(&location).into_response()
        }
    }
}
