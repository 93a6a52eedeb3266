//! Admin session gate: stateless HMAC-signed session cookies.
//!
//! A login endpoint issues a signed, self-expiring token in an HTTP-only
//! cookie; an access gate in front of the protected prefix verifies it on
//! every request without touching any store.

pub mod config;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod ocsf;
pub mod routes;
pub mod session;
pub mod types;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::middleware::gate::{AccessGate, access_gate};
use crate::session::SessionManager;

/// Shared application state available to all route handlers.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionManager,
    pub gate: Arc<AccessGate>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Wire the session manager and access gate to one secret.
    pub fn new(config: Config, credentials: Arc<dyn CredentialStore>) -> Self {
        let sessions = SessionManager::new(
            config.session_secret.clone(),
            config.session_ttl_secs,
            config.session_https_only,
        );
        let gate = Arc::new(AccessGate::new(
            config.session_secret.clone(),
            &config.protected_prefix,
            &config.login_path,
        ));
        Self {
            config,
            sessions,
            gate,
            credentials,
        }
    }
}

/// Build the Axum router with all middleware and routes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let gate = state.gate.clone();
    let prefix = state.config.protected_prefix.trim_end_matches('/').to_string();
    let login_path = state.config.login_path.clone();

    let protected = Router::new()
        .route("/", axum::routing::get(routes::admin::dashboard))
        .route("/{*rest}", axum::routing::get(routes::admin::dashboard));

    let app = Router::new()
        .route("/health", axum::routing::get(routes::health::health))
        .route(
            &login_path,
            axum::routing::get(routes::login::login_entry).post(routes::login::login),
        )
        .route("/logout", axum::routing::post(routes::logout::logout));

    let app = if prefix.is_empty() {
        app.merge(protected)
    } else {
        // A nested "/" only answers the bare prefix.
        app.route(
            &format!("{prefix}/"),
            axum::routing::get(routes::admin::dashboard),
        )
        .nest(&prefix, protected)
    };

    app.layer(from_fn(move |req: Request, next: Next| {
        let gate = gate.clone();
        access_gate(gate, req, next)
    }))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
