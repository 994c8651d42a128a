//! Credential store contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::StoreError;

/// A stored user, including the password hash.
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The public view of a [`User`]; never carries the password hash.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Fields required to create a user; the store assigns `id` and `created_at`.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user. Fails with [`StoreError::DuplicateKey`] if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::nil(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn debug_redacts_password_hash() {
        let debug = format!("{:?}", user());
        assert!(debug.contains("alice@example.com"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn profile_omits_password_hash() -> anyhow::Result<()> {
        let value = serde_json::to_value(UserProfile::from(user()))?;
        assert!(value.get("password_hash").is_none());
        assert!(value.get("passwordHash").is_none());
        assert_eq!(
            value.get("email").and_then(serde_json::Value::as_str),
            Some("alice@example.com")
        );
        assert_eq!(
            value.get("created_at").and_then(serde_json::Value::as_str),
            Some("1970-01-01T00:00:00Z")
        );
        Ok(())
    }
}
