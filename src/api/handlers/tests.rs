use crate::api::app;
use crate::auth::{AuthService, Hasher, HasherConfig, MemoryUserStore, TokenIssuer};
use anyhow::{Result, anyhow};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
    response::Response,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::Arc;
use time::OffsetDateTime;
use tower::ServiceExt;

const SECRET: &str = "router-test-secret";

fn test_app() -> Result<Router> {
    let hasher = Hasher::new(HasherConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })?;
    let issuer = TokenIssuer::new(Some(SecretString::from(SECRET.to_string())));
    let auth = AuthService::new(Arc::new(MemoryUserStore::new()), hasher, issuer);
    Ok(app(Arc::new(auth)))
}

fn post_json(uri: &str, body: &Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

async fn json_body(response: Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn signup_alice(app: &Router) -> Result<Response> {
    let request = post_json(
        "/signup",
        &json!({"username": "alice", "email": "alice@example.com", "password": "secret1"}),
    )?;
    Ok(app.clone().oneshot(request).await?)
}

#[tokio::test]
async fn root_returns_message() -> Result<()> {
    let app = test_app()?;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await?;
    assert_eq!(body["message"], "GET is successful");
    Ok(())
}

#[tokio::test]
async fn signup_returns_profile_without_hash() -> Result<()> {
    let app = test_app()?;
    let response = signup_alice(&app).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["result"]["username"], "alice");
    assert_eq!(body["result"]["email"], "alice@example.com");
    assert!(body["result"]["id"].is_string());
    assert!(body["result"].get("password_hash").is_none());
    assert!(body["result"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn signup_duplicate_email_is_rejected() -> Result<()> {
    let app = test_app()?;
    signup_alice(&app).await?;
    let response = signup_alice(&app).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Email already exists");
    Ok(())
}

#[tokio::test]
async fn signup_invalid_input_lists_violations() -> Result<()> {
    let app = test_app()?;
    let request = post_json(
        "/signup",
        &json!({"username": "abc", "email": "nope", "password": "123"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Please give valid input");
    let fields: Vec<&str> = body["error"]
        .as_array()
        .ok_or_else(|| anyhow!("error is not an array"))?
        .iter()
        .filter_map(|v| v["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
    Ok(())
}

#[tokio::test]
async fn signup_missing_fields_are_violations() -> Result<()> {
    let app = test_app()?;
    let response = app.oneshot(post_json("/signup", &json!({}))?).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Please give valid input");
    Ok(())
}

async fn violation_fields(response: Response) -> Result<Vec<String>> {
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Please give valid input");
    Ok(body["error"]
        .as_array()
        .ok_or_else(|| anyhow!("error is not an array"))?
        .iter()
        .filter_map(|v| v["field"].as_str().map(str::to_string))
        .collect())
}

#[tokio::test]
async fn signup_numeric_field_is_a_violation() -> Result<()> {
    let app = test_app()?;
    let request = post_json(
        "/signup",
        &json!({"username": 123, "email": "alice@example.com", "password": "secret1"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(violation_fields(response).await?, vec!["username"]);
    Ok(())
}

#[tokio::test]
async fn signup_null_field_is_a_violation() -> Result<()> {
    let app = test_app()?;
    let request = post_json(
        "/signup",
        &json!({"username": "alice", "email": null, "password": "secret1"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(violation_fields(response).await?, vec!["email"]);
    Ok(())
}

#[tokio::test]
async fn signup_non_object_body_is_a_violation() -> Result<()> {
    let app = test_app()?;
    let response = app.oneshot(post_json("/signup", &json!([1, 2]))?).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        violation_fields(response).await?,
        vec!["username", "email", "password"]
    );
    Ok(())
}

#[tokio::test]
async fn signin_non_string_password_is_rejected() -> Result<()> {
    let app = test_app()?;
    signup_alice(&app).await?;
    let request = post_json(
        "/signin",
        &json!({"email": "alice@example.com", "password": 123456}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Invalid password");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_missing_payload() -> Result<()> {
    let app = test_app()?;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/signin")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Missing payload");
    Ok(())
}

#[tokio::test]
async fn signin_returns_verifiable_token() -> Result<()> {
    let app = test_app()?;
    let created = json_body(signup_alice(&app).await?).await?;
    let user_id = created["result"]["id"]
        .as_str()
        .ok_or_else(|| anyhow!("missing id"))?
        .to_string();

    let request = post_json(
        "/signin",
        &json!({"email": "alice@example.com", "password": "secret1"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Signin successful");
    let token = body["token"]
        .as_str()
        .ok_or_else(|| anyhow!("missing token"))?;

    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = session_token::verify(token, SECRET.as_bytes(), now)?;
    assert_eq!(claims.id, user_id);
    Ok(())
}

#[tokio::test]
async fn signin_unknown_email_is_rejected() -> Result<()> {
    let app = test_app()?;
    let request = post_json(
        "/signin",
        &json!({"email": "ghost@example.com", "password": "secret1"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Invalid email or user not found");
    Ok(())
}

#[tokio::test]
async fn signin_wrong_password_is_rejected() -> Result<()> {
    let app = test_app()?;
    signup_alice(&app).await?;
    let request = post_json(
        "/signin",
        &json!({"email": "alice@example.com", "password": "wrong-pw"}),
    )?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["message"], "Invalid password");
    Ok(())
}

#[tokio::test]
async fn health_get_reports_store_status() -> Result<()> {
    let app = test_app()?;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let x_app = response
        .headers()
        .get("X-App")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| anyhow!("missing X-App header"))?;
    assert!(x_app.starts_with(&format!(
        "{}:{}:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )));

    let body = json_body(response).await?;
    assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn health_options_has_empty_body() -> Result<()> {
    let app = test_app()?;
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/health")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert!(bytes.is_empty());
    Ok(())
}

#[tokio::test]
async fn request_id_is_propagated() -> Result<()> {
    let app = test_app()?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "req-123")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    Ok(())
}
