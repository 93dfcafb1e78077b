// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::manager::DatabaseError;
use crate::database::repository::StoreError;

/// HTTP API error with fixed status codes and client-facing messages.
/// Internal error detail never crosses this boundary; it is logged where the
/// conversion happens and the client sees only the uniform envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest,

    // 404 Not Found
    NotFound,

    // 422 Unprocessable Entity (reserved by contract, unused by handlers)
    Unprocessable,

    // Carries its own status and message from the authorization checker
    Auth(AuthError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(err) => err.status_code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest => "bad request".to_string(),
            ApiError::NotFound => "resource not found".to_string(),
            ApiError::Unprocessable => "unprocessable".to_string(),
            ApiError::Auth(err) => err.to_string(),
        }
    }

    /// The uniform error envelope
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.message(),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            other => {
                tracing::error!("storage failure: {}", other);
                ApiError::BadRequest
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("database unavailable: {}", err);
        ApiError::BadRequest
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

// Auth failures short-circuit out of the permission middleware directly
impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        ApiError::Auth(self).into_response()
    }
}
