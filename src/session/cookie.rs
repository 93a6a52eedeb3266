//! Session cookie rendering and `Cookie:` header parsing.

use axum::http::header;
use axum::http::HeaderMap;

pub const COOKIE_NAME: &str = "admin_session";

/// Attributes shared by every cookie the session manager writes.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self {
            name: COOKIE_NAME.into(),
            secure,
        }
    }

    /// `Set-Cookie` value carrying a token. No Max-Age: the token's own
    /// expiry bounds the session.
    pub fn make_set_cookie(&self, token: &str) -> String {
        let mut parts = vec![
            format!("{}={}", self.name, token),
            "Path=/".into(),
            "HttpOnly".into(),
            "SameSite=Lax".into(),
        ];
        if self.secure {
            parts.push("Secure".into());
        }
        parts.join("; ")
    }

    /// `Set-Cookie` value that empties the cookie and expires it now.
    pub fn make_delete_cookie(&self) -> String {
        let mut parts = vec![
            format!("{}=", self.name),
            "Max-Age=0".into(),
            "Path=/".into(),
            "HttpOnly".into(),
            "SameSite=Lax".into(),
        ];
        if self.secure {
            parts.push("Secure".into());
        }
        parts.join("; ")
    }
}

/// Find a cookie by exact name in a raw `Cookie:` header value.
///
/// The value runs to the next `;` or the end of the string. A cookie whose
/// name merely starts or ends with `name` does not match.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let trimmed = part.trim();
        if let Some(value) = trimmed.strip_prefix(name)
            && let Some(value) = value.strip_prefix('=')
        {
            return Some(value.trim());
        }
    }
    None
}

/// Join every `Cookie:` header line into one raw header string.
///
/// HTTP/2 clients may split cookies across several header lines.
pub fn joined_cookie_header(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("; "))
    }
}
