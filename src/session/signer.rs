//! HMAC-SHA256 signing of encoded payloads.
//!
//! The signature covers the UTF-8 bytes of the encoded payload text, not the
//! raw JSON. Comparison goes through `subtle` so the time taken does not
//! depend on where two signatures first differ.

use subtle::ConstantTimeEq;

use super::primitives::Primitives;
use super::secret::Secret;

/// Sign an encoded payload, returning the unpadded base64url digest.
pub fn sign<P: Primitives>(encoded_payload: &str, secret: &Secret) -> String {
    P::encode(&P::hmac_sha256(secret.as_bytes(), encoded_payload.as_bytes()))
}

/// Check a presented signature against the expected one.
pub fn verify<P: Primitives>(encoded_payload: &str, signature: &str, secret: &Secret) -> bool {
    let expected = sign::<P>(encoded_payload, secret);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Length check, then a constant-time content comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
