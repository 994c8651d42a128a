use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::error::{auth_error_response, missing_payload_response};
use super::types::{
    MessageResponse, SignupRequest, SignupResponse, ValidationErrorResponse,
};
use crate::auth::{AuthService, UserProfile};

#[utoipa::path(
    post,
    path= "/signup",
    request_body = SignupRequest,
    responses (
        (status = 200, description = "User created", body = SignupResponse, content_type = "application/json"),
        (status = 400, description = "Body is missing or not JSON", body = MessageResponse),
        (status = 401, description = "Invalid input (with violations) or email already exists", body = ValidationErrorResponse),
    ),
    tag= "auth"
)]
// axum handler for signup
#[instrument(skip(auth, payload))]
pub async fn signup(
    auth: Extension<Arc<AuthService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(body)) => SignupRequest::from_json(&body),
        Err(rejection) => {
            debug!("Rejected signup payload: {}", rejection);
            return missing_payload_response();
        }
    };

    debug!("signup: {:?}", request);

    match auth
        .signup(&request.username, &request.email, &request.password)
        .await
    {
        Ok(user) => (
            StatusCode::OK,
            Json(SignupResponse {
                message: "User created successfully".to_string(),
                result: UserProfile::from(user),
            }),
        )
            .into_response(),
        Err(err) => auth_error_response(err),
    }
}
