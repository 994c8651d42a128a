use crate::Error;
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default validity of an issued token (1 hour).
pub const DEFAULT_TTL_SECONDS: i64 = 60 * 60;

const ALG: &str = "HS256";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionHeader {
    fn hs256() -> Self {
        Self {
            alg: ALG.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Id of the user the token was issued to.
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Error> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn keyed_mac(secret: &[u8]) -> Result<HmacSha256, Error> {
    if secret.is_empty() {
        return Err(Error::MissingSecret);
    }
    HmacSha256::new_from_slice(secret).map_err(|_| Error::MissingSecret)
}

/// Issue a token for `user_id`, valid for `ttl_seconds` from `now_unix_seconds`.
///
/// # Errors
///
/// Returns [`Error::MissingSecret`] if `secret` is empty, [`Error::InvalidTtl`] if
/// `ttl_seconds` is not positive, or a JSON error if the claims cannot be encoded.
pub fn issue(
    user_id: impl Into<String>,
    secret: &[u8],
    ttl_seconds: i64,
    now_unix_seconds: i64,
) -> Result<String, Error> {
    if ttl_seconds <= 0 {
        return Err(Error::InvalidTtl);
    }
    let mut mac = keyed_mac(secret)?;

    let exp = now_unix_seconds
        .checked_add(ttl_seconds)
        .ok_or(Error::InvalidTtl)?;
    let claims = SessionClaims {
        id: user_id.into(),
        iat: now_unix_seconds,
        exp,
    };

    let header_b64 = b64e_json(&SessionHeader::hs256())?;
    let claims_b64 = b64e_json(&claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    mac.update(signing_input.as_bytes());
    let signature_b64 = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Verify a token and return its claims.
///
/// The MAC comparison is constant time.
///
/// # Errors
///
/// Returns an error if:
/// - the secret is empty,
/// - the token is malformed or contains invalid base64/json,
/// - the algorithm is not `HS256`,
/// - the signature does not match,
/// - `exp` is not after `now_unix_seconds`.
pub fn verify(token: &str, secret: &[u8], now_unix_seconds: i64) -> Result<SessionClaims, Error> {
    let mut mac = keyed_mac(secret)?;

    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(Error::TokenFormat)?;
    if parts.next().is_some() {
        return Err(Error::TokenFormat);
    }

    let header: SessionHeader = b64d_json(header_b64)?;
    if header.alg != ALG {
        return Err(Error::UnsupportedAlg(header.alg));
    }

    let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| Error::Base64)?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(claims_b64.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)?;

    let claims: SessionClaims = b64d_json(claims_b64)?;
    if claims.exp <= now_unix_seconds {
        return Err(Error::Expired);
    }

    Ok(claims)
}
