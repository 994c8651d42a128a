//! # Authgate
//!
//! `authgate` is a small authentication service: users sign up with a
//! username, email and password, and sign in to receive a signed session token.
//!
//! ## Credentials
//!
//! Passwords are hashed with **Argon2id** using a fresh random salt per hash. Only
//! the PHC-formatted hash is stored; the plaintext never leaves the request that
//! carried it and is never logged.
//!
//! Emails are trimmed and lower-cased before any lookup. Uniqueness is checked
//! before insert and enforced again by a `UNIQUE` constraint in the database, so
//! two concurrent signups for the same email cannot both succeed.
//!
//! ## Session Tokens
//!
//! Signin issues an HS256 JWT carrying `{id, iat, exp}` (see the `session_token`
//! crate). Tokens are stateless: there is no session table, no revocation and no
//! refresh. Issuance fails if no signing secret is configured.
//!
//! ## Status Codes
//!
//! Every user-facing rejection (invalid input, duplicate email, unknown email,
//! wrong password) is reported as `401 Unauthorized` with a JSON `message`.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
