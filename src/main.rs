//! Server entrypoint.
//!
//! Loads `.env`, initializes tracing, and refuses to start without a
//! session secret.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use admin_session_gate::config::Config;
use admin_session_gate::credentials::StaticCredentialStore;
use admin_session_gate::{AppState, create_app};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // JSON logs for deployed environments, pretty for local
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Refusing to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(StaticCredentialStore::demo()),
    ));
    let app = create_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Listening on {} (protected prefix {}, secure cookies: {})",
        addr,
        config.protected_prefix,
        config.session_https_only
    );
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
