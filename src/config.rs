//! Application configuration via environment variables.

use std::env;

use crate::session::{DEFAULT_TTL_SECS, Secret};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub session_secret: Secret,
    pub session_ttl_secs: u64,
    pub session_https_only: bool,
    pub protected_prefix: String,
    pub login_path: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Required: `SESSION_SECRET`. There is no fallback key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));
        let session_https_only = lookup("SESSION_HTTPS_ONLY")
            .map(|v| v == "true" || v == "1" || v == "True")
            .unwrap_or(production);

        Ok(Self {
            session_secret: Secret::from_lookup(&lookup)?,
            session_ttl_secs: lookup("SESSION_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_TTL_SECS),
            session_https_only,
            protected_prefix: lookup("PROTECTED_PREFIX")
                .filter(|p| p.starts_with('/'))
                .unwrap_or_else(|| "/admin".into()),
            login_path: lookup("LOGIN_PATH")
                .filter(|p| p.starts_with('/'))
                .unwrap_or_else(|| "/login".into()),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }
}

/// Configuration for testing; all fields settable directly.
impl Config {
    pub fn test_default() -> Self {
        Self {
            session_secret: Secret::new("test-secret-key").expect("non-empty test secret"),
            session_ttl_secs: DEFAULT_TTL_SECS,
            session_https_only: false,
            protected_prefix: "/admin".into(),
            login_path: "/login".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("environment variable {0} must not be empty")]
    EmptySecret(String),
}
