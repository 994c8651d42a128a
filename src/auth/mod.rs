//! Signup and signin flows.
//!
//! [`AuthService`] chains the validator, the credential store, the hasher and the
//! token issuer. Every step is fallible and the first failure ends the flow:
//!
//! - signup: validate → lookup by email → hash → insert
//! - signin: lookup by email → verify password → issue token
//!
//! The store is injected as `Arc<dyn UserStore>` so the same service runs over
//! PostgreSQL in production and [`MemoryUserStore`] in tests.

mod error;
pub mod hasher;
pub mod issuer;
mod memory;
mod postgres;
pub mod store;
pub mod validator;

pub use error::{AuthError, StoreError, Violation};
pub use hasher::{Hasher, HasherConfig};
pub use issuer::TokenIssuer;
pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{NewUser, User, UserProfile, UserStore};

use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Hasher,
    issuer: TokenIssuer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, hasher: Hasher, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    #[must_use]
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`] with every violated rule,
    /// - [`AuthError::Conflict`] if the email is already registered, including
    ///   when a concurrent signup wins the insert,
    /// - [`AuthError::Store`] / [`AuthError::Hash`] on infrastructure failures.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let valid = validator::validate(username, email, password)
            .map_err(AuthError::InvalidInput)?;

        if self.store.find_by_email(&valid.email).await?.is_some() {
            debug!("email already registered");
            return Err(AuthError::Conflict);
        }

        let hasher = self.hasher.clone();
        let password = valid.password;
        let password_hash =
            tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
                .await
                .map_err(|e| AuthError::Hash(e.to_string()))??;

        let user = self
            .store
            .create(NewUser {
                username: valid.username,
                email: valid.email,
                password_hash,
            })
            .await?;

        debug!(user_id = %user.id, "user created");

        Ok(user)
    }

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] if no user has this email,
    /// - [`AuthError::Unauthorized`] if the password does not match,
    /// - [`AuthError::Configuration`] if no signing secret is configured,
    /// - [`AuthError::Store`] / [`AuthError::Hash`] on infrastructure failures.
    #[instrument(skip(self, password))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = validator::normalize_email(email);

        let Some(user) = self.store.find_by_email(&email).await? else {
            debug!("user not found");
            return Err(AuthError::NotFound);
        };

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
                .await
                .map_err(|e| AuthError::Hash(e.to_string()))??;

        if !verified {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let token = self.issuer.issue(user.id)?;

        debug!(user_id = %user.id, "signin successful");

        Ok(token)
    }
}
