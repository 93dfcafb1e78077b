use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod jwks;
pub mod verifier;

pub use jwks::{Jwk, KeySet};
pub use verifier::{verifier, TokenVerifier};

/// Decoded access token claims. Produced only after signature and claim
/// validation succeed; lives for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: Audience,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Permission strings granted by the identity provider. A token without
    /// the claim at all is malformed for this API, not merely unauthorized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// The `aud` claim may be issued as a single value or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .map(|perms| perms.iter().any(|p| p == permission))
            .unwrap_or(false)
    }
}

/// Structured failure from the authorization checker. Each variant carries
/// its own status code and is reported to the client unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,

    #[error("authorization header must be a bearer token")]
    InvalidHeader,

    #[error("unable to parse authentication token")]
    MalformedToken,

    #[error("unable to find a matching signing key")]
    KeyNotFound,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    TokenExpired,

    #[error("incorrect claims, check the audience and issuer")]
    InvalidClaims,

    #[error("permissions not included in token")]
    PermissionsMissing,

    #[error("permission not found")]
    Forbidden,

    #[error("unable to fetch signing keys")]
    KeySetUnavailable,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::InvalidHeader
            | AuthError::MalformedToken
            | AuthError::KeyNotFound
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => StatusCode::UNAUTHORIZED,
            AuthError::PermissionsMissing => StatusCode::BAD_REQUEST,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
