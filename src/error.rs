//! Error types for the reply cache server
//!
//! Provides unified error handling using thiserror.
//!
//! A cache miss is deliberately NOT part of this taxonomy: `ResponseCache::get`
//! returns `Option<String>` so that "absent" is an ordinary value, never an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the reply cache server.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A resource with this name is already registered
    #[error("Resource already registered: {0}")]
    DuplicateResource(String),

    /// Acquire was called for a name that was never registered
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// The resource factory failed; the resource reverts to unloaded
    #[error("Failed to load resource '{name}': {message}")]
    LoadFailed { name: String, message: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::DuplicateResource(_) => (StatusCode::CONFLICT, self.to_string()),
            ServiceError::UnknownResource(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServiceError::LoadFailed { .. } => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ServiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the reply cache server.
pub type Result<T> = std::result::Result<T, ServiceError>;
