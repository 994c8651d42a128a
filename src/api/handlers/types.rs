//! Request/response types for the auth endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::{UserProfile, Violation};

/// Missing fields deserialize as empty strings so they are reported by the
/// validator like any other bad value.
#[derive(ToSchema, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Missing, `null` and non-string values read as "" so they fail validation
// for that field instead of rejecting the whole body.
fn string_field(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl SignupRequest {
    pub(crate) fn from_json(body: &Value) -> Self {
        Self {
            username: string_field(body, "username"),
            email: string_field(body, "email"),
            password: string_field(body, "password"),
        }
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SigninRequest {
    pub(crate) fn from_json(body: &Value) -> Self {
        Self {
            email: string_field(body, "email"),
            password: string_field(body, "password"),
        }
    }
}

impl std::fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub error: Vec<Violation>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    pub message: String,
    pub result: UserProfile,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
}
