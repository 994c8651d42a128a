use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single failed validation rule.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    DuplicateKey,
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input")]
    InvalidInput(Vec<Violation>),
    #[error("email already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("invalid password")]
    Unauthorized,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("credential store error")]
    Store(#[source] StoreError),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token issuance failed")]
    Token(#[source] session_token::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => Self::Conflict,
            err @ StoreError::Database(_) => Self::Store(err),
        }
    }
}

impl From<session_token::Error> for AuthError {
    fn from(err: session_token::Error) -> Self {
        match err {
            session_token::Error::MissingSecret => {
                Self::Configuration("token signing secret is not set".to_string())
            }
            err => Self::Token(err),
        }
    }
}
