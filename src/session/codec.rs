//! Session payload codec: JSON → unpadded base64url and back.
//!
//! Decoding runs on untrusted cookie input, so every failure mode folds
//! into `MalformedPayload` instead of escaping to the caller.

use serde::{Deserialize, Serialize};

use super::primitives::Primitives;

/// The principal and expiry embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Lower-cased principal identifier.
    pub email: String,
    /// Unix seconds after which the payload is no longer valid.
    #[serde(rename = "exp")]
    pub expires_at: u64,
}

impl SessionPayload {
    /// Build a payload, normalizing the email to lower case.
    pub fn new(email: &str, expires_at: u64) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            expires_at,
        }
    }

    /// Both fields must carry a value for the payload to be accepted.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && self.expires_at != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPayload {
    #[error("payload is not valid base64url")]
    Base64,
    #[error("payload is not a valid session document")]
    Structure,
    #[error("payload is missing email or expiry")]
    Incomplete,
}

/// Encode a payload to its wire text.
pub fn encode<P: Primitives>(payload: &SessionPayload) -> String {
    let json = serde_json::to_vec(payload).expect("session payload always serializes");
    P::encode(&json)
}

/// Decode wire text back to a complete payload.
pub fn decode<P: Primitives>(text: &str) -> Result<SessionPayload, MalformedPayload> {
    let bytes = P::decode(text).ok_or(MalformedPayload::Base64)?;
    let payload: SessionPayload =
        serde_json::from_slice(&bytes).map_err(|_| MalformedPayload::Structure)?;
    if !payload.is_complete() {
        return Err(MalformedPayload::Incomplete);
    }
    Ok(payload)
}
