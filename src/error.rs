//! Error types for the inventory API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;
use crate::store::StoreError;

// == API Error Enum ==
/// Unified error type surfaced by handlers and the inventory service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected input (missing fields, duplicate username, bad payload)
    #[error("{0}")]
    Validation(String),

    /// Record or route target does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Entity store failed to save or delete
    #[error("{0}")]
    Persistence(String),

    /// Anything else that should not reach the client in detail
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Persistence(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Unexpected(inner) => {
                error!(error = %inner, "entity store failure");
                ApiError::Persistence(inner.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields | AuthError::UsernameTaken => {
                ApiError::Validation(err.to_string())
            }
            AuthError::MissingCredentials
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::Signing(_) => ApiError::Internal(err.to_string()),
        }
    }
}

// == Cache Error Enum ==
/// Errors raised by the in-process cache store when a write is rejected.
///
/// These never reach clients; the cache client logs them and degrades to a miss.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty or longer than `MAX_KEY_LENGTH`
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    /// Value is larger than `MAX_VALUE_SIZE`
    #[error("cache value too large: {0} bytes")]
    ValueTooLarge(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the inventory API.
pub type Result<T> = std::result::Result<T, ApiError>;
