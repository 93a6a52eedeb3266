//! Stateless signed sessions.
//!
//! A session is a self-contained token in a cookie; nothing is stored
//! server-side. The protocol (codec, signer, read algorithm) is written
//! once in `token` and instantiated twice: `manager` for the full server
//! runtime and `edge` for the request-gating runtime.

pub mod codec;
pub mod cookie;
pub mod edge;
pub mod manager;
pub mod primitives;
pub mod secret;
pub mod signer;
pub mod token;

pub use codec::SessionPayload;
pub use edge::EdgeVerifier;
pub use manager::{CurrentSession, SessionManager};
pub use secret::Secret;
pub use token::{Rejection, SessionOutcome, TokenProtocol};

/// Default session lifetime: 8 hours.
pub const DEFAULT_TTL_SECS: u64 = 8 * 3600;
