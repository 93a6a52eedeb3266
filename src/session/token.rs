//! The session token protocol.
//!
//! Token format: `base64url(payload_json).base64url(hmac_sha256(secret, encoded_payload))`
//!
//! Issuing and the five-step read algorithm live here exactly once. The
//! full-runtime manager and the edge verifier differ only in how the cookie
//! value reaches `read` and in which `Primitives` set they instantiate.

use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

use super::codec::{self, SessionPayload};
use super::primitives::Primitives;
use super::secret::Secret;
use super::signer;

/// Result of reading a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Signature, structure and expiry all check out.
    Valid(SessionPayload),
    /// No cookie value was presented.
    Absent,
    /// Something was presented but it is not a live session.
    Invalid,
}

impl SessionOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionOutcome::Valid(_))
    }

    /// Collapse `Absent` and `Invalid` for callers that only need the payload.
    pub fn into_payload(self) -> Option<SessionPayload> {
        match self {
            SessionOutcome::Valid(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Why a presented token was refused. Logged server-side only; clients
/// never see which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Malformed,
    BadSignature,
    BadPayload,
    Expired,
}

/// Current Unix time in whole seconds.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Issue and verify tokens under one secret with primitive set `P`.
pub struct TokenProtocol<P> {
    secret: Secret,
    _primitives: PhantomData<P>,
}

impl<P> Clone for TokenProtocol<P> {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            _primitives: PhantomData,
        }
    }
}

impl<P: Primitives> TokenProtocol<P> {
    pub fn new(secret: Secret) -> Self {
        Self {
            secret,
            _primitives: PhantomData,
        }
    }

    /// Build a signed token for `email` valid for `ttl_secs` after `now`.
    pub fn issue_at(&self, email: &str, ttl_secs: u64, now: u64) -> String {
        let payload = SessionPayload::new(email, now.saturating_add(ttl_secs));
        self.seal(&payload)
    }

    /// Encode and sign an already-built payload.
    pub fn seal(&self, payload: &SessionPayload) -> String {
        let encoded = codec::encode::<P>(payload);
        let signature = signer::sign::<P>(&encoded, &self.secret);
        format!("{}.{}", encoded, signature)
    }

    /// Read a cookie value at the current time.
    pub fn read(&self, cookie_value: Option<&str>) -> SessionOutcome {
        self.read_at(cookie_value, now_secs())
    }

    /// Read a cookie value as of `now`.
    pub fn read_at(&self, cookie_value: Option<&str>, now: u64) -> SessionOutcome {
        let token = match cookie_value {
            Some(v) if !v.is_empty() => v,
            _ => return SessionOutcome::Absent,
        };
        match self.verify_at(token, now) {
            Ok(payload) => SessionOutcome::Valid(payload),
            Err(reason) => {
                tracing::debug!(?reason, "session token rejected");
                SessionOutcome::Invalid
            }
        }
    }

    /// Steps 2 to 5: shape, signature, payload, expiry.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<SessionPayload, Rejection> {
        let (encoded, signature) = split_token(token).ok_or(Rejection::Malformed)?;

        if !signer::verify::<P>(encoded, signature, &self.secret) {
            return Err(Rejection::BadSignature);
        }

        let payload = codec::decode::<P>(encoded).map_err(|_| Rejection::BadPayload)?;

        if payload.expires_at < now {
            return Err(Rejection::Expired);
        }

        Ok(payload)
    }
}

/// Exactly one `.` with non-empty text on both sides.
fn split_token(token: &str) -> Option<(&str, &str)> {
    let (encoded, signature) = token.split_once('.')?;
    if encoded.is_empty() || signature.is_empty() || signature.contains('.') {
        return None;
    }
    Some((encoded, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::primitives::{Edge, Native};

    const NOW: u64 = 1_800_000_000;
    const TTL: u64 = 8 * 3600;

    fn native(secret: &str) -> TokenProtocol<Native> {
        TokenProtocol::new(Secret::new(secret).unwrap())
    }

    fn edge(secret: &str) -> TokenProtocol<Edge> {
        TokenProtocol::new(Secret::new(secret).unwrap())
    }

    #[test]
    fn test_issue_and_read() {
        let proto = native("test-secret-key");
        let token = proto.issue_at("Admin@Gmail.com", TTL, NOW);
        let outcome = proto.read_at(Some(&token), NOW);
        assert_eq!(
            outcome,
            SessionOutcome::Valid(SessionPayload {
                email: "admin@gmail.com".into(),
                expires_at: NOW + TTL,
            })
        );
    }

    #[test]
    fn test_token_shape() {
        let token = native("k").issue_at("a@gmail.com", TTL, NOW);
        assert_eq!(token.matches('.').count(), 1);
        assert!(!token.contains('='));
        assert!(!token.chars().any(char::is_whitespace));
    }

    #[test]
    fn test_absent() {
        let proto = native("k");
        assert_eq!(proto.read_at(None, NOW), SessionOutcome::Absent);
        assert_eq!(proto.read_at(Some(""), NOW), SessionOutcome::Absent);
    }

    #[test]
    fn test_malformed_shapes() {
        let proto = native("k");
        let token = proto.issue_at("a@gmail.com", TTL, NOW);
        let (encoded, signature) = token.split_once('.').unwrap();
        for bad in [
            "nodothere".to_string(),
            format!("{encoded}."),
            format!(".{signature}"),
            format!("{encoded}.{signature}.extra"),
            format!("{encoded}..{signature}"),
            ".".to_string(),
        ] {
            assert_eq!(proto.verify_at(&bad, NOW), Err(Rejection::Malformed), "{bad}");
            assert_eq!(proto.read_at(Some(&bad), NOW), SessionOutcome::Invalid);
        }
    }

    #[test]
    fn test_every_single_bit_flip_in_signature_fails() {
        let proto = native("k");
        let token = proto.issue_at("a@gmail.com", TTL, NOW);
        let (encoded, signature) = token.split_once('.').unwrap();
        let bytes = signature.as_bytes();
        for i in 0..bytes.len() {
            for bit in 0..8 {
                let mut flipped = bytes.to_vec();
                flipped[i] ^= 1 << bit;
                let Ok(flipped) = String::from_utf8(flipped) else {
                    continue;
                };
                let tampered = format!("{encoded}.{flipped}");
                assert_eq!(proto.read_at(Some(&tampered), NOW), SessionOutcome::Invalid);
            }
        }
    }

    #[test]
    fn test_tampered_payload_fails() {
        let proto = native("k");
        let token = proto.issue_at("a@gmail.com", TTL, NOW);
        let (_, signature) = token.split_once('.').unwrap();
        let forged = codec::encode::<Native>(&SessionPayload::new("a@gmail.com", NOW + 10 * TTL));
        assert_eq!(
            proto.verify_at(&format!("{forged}.{signature}"), NOW),
            Err(Rejection::BadSignature)
        );
    }

    #[test]
    fn test_expired_with_valid_signature() {
        let proto = native("k");
        let token = proto.issue_at("a@gmail.com", 60, NOW);
        assert!(proto.read_at(Some(&token), NOW + 60).is_authenticated());
        assert_eq!(proto.verify_at(&token, NOW + 61), Err(Rejection::Expired));
        assert_eq!(proto.read_at(Some(&token), NOW + 61), SessionOutcome::Invalid);
    }

    #[test]
    fn test_one_second_ttl_expires_after_two_seconds() {
        let proto = native("k");
        let token = proto.issue_at("user@gmail.com", 1, now_secs());
        std::thread::sleep(std::time::Duration::from_secs(2));
        assert_eq!(proto.read(Some(&token)), SessionOutcome::Invalid);
    }

    #[test]
    fn test_wrong_secret() {
        let token = native("secret-a").issue_at("a@gmail.com", TTL, NOW);
        assert_eq!(
            native("secret-b").verify_at(&token, NOW),
            Err(Rejection::BadSignature)
        );
    }

    #[test]
    fn test_signed_but_incomplete_payload_rejected() {
        let proto = native("k");
        let token = proto.seal(&SessionPayload {
            email: String::new(),
            expires_at: NOW + TTL,
        });
        assert_eq!(proto.verify_at(&token, NOW), Err(Rejection::BadPayload));
    }

    #[test]
    fn test_signed_garbage_payload_rejected() {
        let proto = native("k");
        let encoded = Native::encode(b"[1,2,3]");
        let signature = signer::sign::<Native>(&encoded, &Secret::new("k").unwrap());
        assert_eq!(
            proto.verify_at(&format!("{encoded}.{signature}"), NOW),
            Err(Rejection::BadPayload)
        );
    }

    #[test]
    fn test_native_issued_edge_verified() {
        let token = native("shared").issue_at("a@gmail.com", TTL, NOW);
        assert_eq!(
            edge("shared").read_at(Some(&token), NOW),
            native("shared").read_at(Some(&token), NOW)
        );
        assert!(edge("shared").read_at(Some(&token), NOW).is_authenticated());
    }

    #[test]
    fn test_edge_issue_is_byte_identical() {
        assert_eq!(
            native("shared").issue_at("a@gmail.com", TTL, NOW),
            edge("shared").issue_at("a@gmail.com", TTL, NOW)
        );
    }

    #[test]
    fn test_into_payload_collapses_failures() {
        assert!(SessionOutcome::Absent.into_payload().is_none());
        assert!(SessionOutcome::Invalid.into_payload().is_none());
    }

    mod proptest_token {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn any_signature_bit_flip_is_invalid(
                email in "[a-z0-9.]{1,24}@gmail\\.com",
                ttl in 1u64..100_000,
                key in prop::collection::vec(any::<u8>(), 1..64),
                index in any::<prop::sample::Index>(),
                bit in 0u8..8,
            ) {
                let proto = TokenProtocol::<Native>::new(Secret::new(&key).unwrap());
                let token = proto.issue_at(&email, ttl, NOW);
                let (encoded, signature) = token.split_once('.').unwrap();
                let mut flipped = signature.as_bytes().to_vec();
                let i = index.index(flipped.len());
                flipped[i] ^= 1 << bit;
                if let Ok(flipped) = String::from_utf8(flipped) {
                    let tampered = format!("{encoded}.{flipped}");
                    prop_assert_eq!(proto.read_at(Some(&tampered), NOW), SessionOutcome::Invalid);
                }
            }

            #[test]
            fn edge_and_native_read_the_same(
                email in "[a-z0-9.]{1,24}@gmail\\.com",
                ttl in 1u64..100_000,
                key in prop::collection::vec(any::<u8>(), 1..64),
                elapsed in 0u64..200_000,
            ) {
                let secret = Secret::new(&key).unwrap();
                let native = TokenProtocol::<Native>::new(secret.clone());
                let edge = TokenProtocol::<Edge>::new(secret);
                let token = native.issue_at(&email, ttl, NOW);
                prop_assert_eq!(&token, &edge.issue_at(&email, ttl, NOW));
                let now = NOW + elapsed;
                prop_assert_eq!(native.read_at(Some(&token), now), edge.read_at(Some(&token), now));
                prop_assert_eq!(native.read_at(Some(&token), now).is_authenticated(), elapsed <= ttl);
            }
        }
    }
}
