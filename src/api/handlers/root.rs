use axum::{Json, http::StatusCode, response::IntoResponse};

use super::types::MessageResponse;

#[utoipa::path(
    get,
    path= "/",
    responses (
        (status = 200, description = "Service is up", body = MessageResponse, content_type = "application/json"),
    ),
    tag= "authgate"
)]
// axum handler for root
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageResponse::new("GET is successful")),
    )
}
