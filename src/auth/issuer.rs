use secrecy::{ExposeSecret, SecretString};
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::AuthError;

pub use session_token::DEFAULT_TTL_SECONDS;

/// Signs session tokens with the configured shared secret.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    secret: Option<SecretString>,
    ttl_seconds: i64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: Option<SecretString>) -> Self {
        Self {
            secret,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|secret| !secret.expose_secret().is_empty())
    }

    /// Issue a token for `user_id` valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if no secret is set.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(user_id, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Issue a token as if the current time were `now_unix_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if no secret is set, or
    /// [`AuthError::Token`] if the token cannot be built.
    pub fn issue_at(&self, user_id: Uuid, now_unix_seconds: i64) -> Result<String, AuthError> {
        let secret = self.secret.as_ref().map_or("", |s| s.expose_secret());
        let token = session_token::issue(
            user_id.to_string(),
            secret.as_bytes(),
            self.ttl_seconds,
            now_unix_seconds,
        )?;
        Ok(token)
    }
}
