//! Byte and MAC primitives used by the token protocol.
//!
//! Two sets exist. `Native` uses the URL-safe base64 engine and the full
//! `Hmac` block implementation. `Edge` sticks to the minimal surface a
//! request-gating runtime has: the standard base64 alphabet with the
//! URL-safe substitutions done by hand, and `SimpleHmac`. Both must produce
//! byte-identical output and accept exactly the same inputs.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac, SimpleHmac};
use sha2::Sha256;

pub const DIGEST_LEN: usize = 32;

/// A primitive set the token protocol can run on.
pub trait Primitives {
    /// Unpadded URL-safe base64.
    fn encode(bytes: &[u8]) -> String;

    /// Inverse of `encode`. `None` on any malformed input.
    fn decode(text: &str) -> Option<Vec<u8>>;

    /// HMAC-SHA256 of `data` under `key`.
    fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN];
}

/// Full server runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Primitives for Native {
    fn encode(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn decode(text: &str) -> Option<Vec<u8>> {
        URL_SAFE_NO_PAD.decode(text).ok()
    }

    fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        // HMAC accepts keys of any length; new_from_slice cannot fail here.
        let mut mac = <Hmac<Sha256>>::new_from_slice(key).expect("HMAC key length is always valid");
        mac.update(data);
        digest_array(&mac.finalize().into_bytes())
    }
}

/// Edge request-gating runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edge;

impl Primitives for Edge {
    fn encode(bytes: &[u8]) -> String {
        STANDARD
            .encode(bytes)
            .chars()
            .filter(|&c| c != '=')
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect()
    }

    fn decode(text: &str) -> Option<Vec<u8>> {
        // Standard-alphabet characters and padding are not part of the
        // URL-safe language; letting them through would make this set more
        // permissive than `Native`.
        if text.bytes().any(|b| matches!(b, b'+' | b'/' | b'=')) {
            return None;
        }
        let mut standard: String = text
            .chars()
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                other => other,
            })
            .collect();
        let rem = standard.len() % 4;
        if rem != 0 {
            standard.extend(std::iter::repeat_n('=', 4 - rem));
        }
        STANDARD.decode(standard).ok()
    }

    fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut mac =
            <SimpleHmac<Sha256>>::new_from_slice(key).expect("HMAC key length is always valid");
        mac.update(data);
        digest_array(&mac.finalize().into_bytes())
    }
}

fn digest_array(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(bytes);
    out
}
