//! Edge-runtime session verifier.
//!
//! Receives the raw `Cookie:` header string, extracts the session cookie by
//! exact name and runs the shared read algorithm on the `Edge` primitive
//! set. It never issues or clears cookies.

use super::cookie::{COOKIE_NAME, parse_cookie};
use super::primitives::Edge;
use super::secret::Secret;
use super::token::{SessionOutcome, TokenProtocol};

#[derive(Clone)]
pub struct EdgeVerifier {
    protocol: TokenProtocol<Edge>,
    cookie_name: String,
}

impl EdgeVerifier {
    pub fn new(secret: Secret) -> Self {
        Self {
            protocol: TokenProtocol::new(secret),
            cookie_name: COOKIE_NAME.into(),
        }
    }

    /// Verify the session carried by a raw `Cookie:` header, if any.
    pub fn read(&self, cookie_header: Option<&str>) -> SessionOutcome {
        self.protocol.read(self.extract(cookie_header))
    }

    /// Same as `read`, as of `now`.
    pub fn read_at(&self, cookie_header: Option<&str>, now: u64) -> SessionOutcome {
        self.protocol.read_at(self.extract(cookie_header), now)
    }

    fn extract<'a>(&self, cookie_header: Option<&'a str>) -> Option<&'a str> {
        cookie_header.and_then(|h| parse_cookie(h, &self.cookie_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::primitives::Native;

    const NOW: u64 = 1_800_000_000;

    fn secret() -> Secret {
        Secret::new("edge-test-secret").unwrap()
    }

    fn token(email: &str) -> String {
        TokenProtocol::<Native>::new(secret()).issue_at(email, 3600, NOW)
    }

    #[test]
    fn test_no_header_is_absent() {
        let edge = EdgeVerifier::new(secret());
        assert_eq!(edge.read_at(None, NOW), SessionOutcome::Absent);
        assert_eq!(edge.read_at(Some("other=1"), NOW), SessionOutcome::Absent);
    }

    #[test]
    fn test_extracts_exact_cookie_among_many() {
        let edge = EdgeVerifier::new(secret());
        let header = format!(
            "other=1; xadmin_session={}; admin_session={}; another=2",
            token("evil@gmail.com"),
            token("user@gmail.com")
        );
        match edge.read_at(Some(&header), NOW) {
            SessionOutcome::Valid(p) => assert_eq!(p.email, "user@gmail.com"),
            other => panic!("expected valid session, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_cookie_is_invalid() {
        let edge = EdgeVerifier::new(secret());
        assert_eq!(
            edge.read_at(Some("admin_session=garbage"), NOW),
            SessionOutcome::Invalid
        );
    }

    #[test]
    fn test_other_secret_is_invalid() {
        let edge = EdgeVerifier::new(Secret::new("different").unwrap());
        let header = format!("admin_session={}", token("user@gmail.com"));
        assert_eq!(edge.read_at(Some(&header), NOW), SessionOutcome::Invalid);
    }
}
