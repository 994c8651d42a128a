//! Stateless session tokens.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 over a shared secret. The
//! claims bind a user id to an issue time and an expiry; nothing is persisted
//! server side, so validity is decided by the signature and `exp` alone.

mod error;
mod hs256;

pub use error::Error;
pub use hs256::{DEFAULT_TTL_SECONDS, SessionClaims, SessionHeader, issue, verify};
