//! Mapping of [`AuthError`] onto HTTP responses.
//!
//! User-facing rejections all use `401 Unauthorized`; only the message differs.
//! Infrastructure failures become `500` and are logged without leaking detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::types::{MessageResponse, ValidationErrorResponse};
use crate::auth::AuthError;

pub(crate) const MSG_INVALID_INPUT: &str = "Please give valid input";
pub(crate) const MSG_EMAIL_EXISTS: &str = "Email already exists";
pub(crate) const MSG_USER_NOT_FOUND: &str = "Invalid email or user not found";
pub(crate) const MSG_INVALID_PASSWORD: &str = "Invalid password";
pub(crate) const MSG_MISSING_PAYLOAD: &str = "Missing payload";

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

pub(crate) fn missing_payload_response() -> Response {
    message(StatusCode::BAD_REQUEST, MSG_MISSING_PAYLOAD)
}

pub(crate) fn auth_error_response(err: AuthError) -> Response {
    match err {
        AuthError::InvalidInput(violations) => (
            StatusCode::UNAUTHORIZED,
            Json(ValidationErrorResponse {
                message: MSG_INVALID_INPUT.to_string(),
                error: violations,
            }),
        )
            .into_response(),
        AuthError::Conflict => message(StatusCode::UNAUTHORIZED, MSG_EMAIL_EXISTS),
        AuthError::NotFound => message(StatusCode::UNAUTHORIZED, MSG_USER_NOT_FOUND),
        AuthError::Unauthorized => message(StatusCode::UNAUTHORIZED, MSG_INVALID_PASSWORD),
        AuthError::Configuration(reason) => {
            error!("Configuration error: {reason}");
            message(StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured")
        }
        AuthError::Store(err) => {
            error!("Credential store error: {:?}", err);
            message(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error accessing user store",
            )
        }
        AuthError::Hash(reason) => {
            error!("Password hashing error: {reason}");
            message(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing password",
            )
        }
        AuthError::Token(err) => {
            error!("Token issuance error: {:?}", err);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error issuing token")
        }
    }
}
