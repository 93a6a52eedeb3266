//! HMAC key provider.
//!
//! The secret is loaded once from configuration and handed to the token
//! protocol at construction time. It is never serialized, never logged, and
//! there is no default value.

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigError;

/// Environment variable holding the session signing key.
pub const SECRET_ENV: &str = "SESSION_SECRET";

/// Shared, immutable HMAC key.
#[derive(Clone)]
pub struct Secret(Arc<[u8]>);

impl Secret {
    /// Wrap a key value. An empty key is a configuration error.
    pub fn new(value: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let bytes = value.as_ref();
        if bytes.is_empty() {
            return Err(ConfigError::EmptySecret(SECRET_ENV.into()));
        }
        Ok(Self(Arc::from(bytes)))
    }

    /// Resolve the secret through an environment lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(SECRET_ENV).ok_or_else(|| ConfigError::MissingEnv(SECRET_ENV.into()))?;
        Self::new(value)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
