use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid token ttl")]
    InvalidTtl,
}
