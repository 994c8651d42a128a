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
use super::types::{MessageResponse, SigninRequest, SigninResponse};
use crate::auth::AuthService;

#[utoipa::path(
    post,
    path= "/signin",
    request_body = SigninRequest,
    responses (
        (status = 200, description = "Signin successful", body = SigninResponse, content_type = "application/json"),
        (status = 400, description = "Body is missing or not JSON", body = MessageResponse),
        (status = 401, description = "Unknown email or wrong password", body = MessageResponse),
        (status = 500, description = "Token signing secret not configured", body = MessageResponse),
    ),
    tag= "auth"
)]
// axum handler for signin
#[instrument(skip(auth, payload))]
pub async fn signin(
    auth: Extension<Arc<AuthService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(body)) => SigninRequest::from_json(&body),
        Err(rejection) => {
            debug!("Rejected signin payload: {}", rejection);
            return missing_payload_response();
        }
    };

    debug!("signin: {:?}", request);

    match auth.signin(&request.email, &request.password).await {
        Ok(token) => (
            StatusCode::OK,
            Json(SigninResponse {
                message: "Signin successful".to_string(),
                token,
            }),
        )
            .into_response(),
        Err(err) => auth_error_response(err),
    }
}
