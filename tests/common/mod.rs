//! Test utilities: test app builder, token factory, cookie helpers.

#![allow(dead_code)]

use admin_session_gate::config::Config;
use admin_session_gate::credentials::StaticCredentialStore;
use admin_session_gate::session::primitives::Native;
use admin_session_gate::session::{SessionPayload, TokenProtocol};
use admin_session_gate::{AppState, create_app};
use axum::body::Body;
use axum::http::Request;
use serde_json::Value;
use std::sync::Arc;

/// Build a test app with the demo credential store.
pub fn build_test_app() -> (axum::Router, Arc<AppState>) {
    build_test_app_with_config(Config::test_default())
}

/// Build a test app with a custom Config.
pub fn build_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        config,
        Arc::new(StaticCredentialStore::demo()),
    ));
    let app = create_app(state.clone());
    (app, state)
}

pub fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Sign a token for `email` under the app's secret.
pub fn token_for(state: &AppState, email: &str, ttl_secs: u64) -> String {
    TokenProtocol::<Native>::new(state.config.session_secret.clone()).issue_at(
        email,
        ttl_secs,
        now(),
    )
}

/// Sign an arbitrary payload under the app's secret.
pub fn seal(state: &AppState, payload: &SessionPayload) -> String {
    TokenProtocol::<Native>::new(state.config.session_secret.clone()).seal(payload)
}

/// Build a GET request carrying a raw Cookie header.
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

/// Build a POST /login request with a JSON body.
pub fn login_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Extract the `admin_session` value from a response's Set-Cookie header.
pub fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            s.split(';')
                .next()
                .and_then(|c| c.strip_prefix("admin_session="))
                .map(String::from)
        })
}

/// Read response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
