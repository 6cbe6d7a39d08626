//! Typed error handling for the apotheca backend
//!
//! Handlers translate every failure into an [`ErpError`] so clients get
//! a structured `{code, message}` body with the right HTTP status. The
//! query engine itself surfaces only store failures (via `anyhow`);
//! everything else it resolves permissively (see the query module docs).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type surfaced by HTTP handlers
#[derive(Debug)]
pub enum ErpError {
    /// A record was not found
    NotFound {
        resource: &'static str,
        id: Uuid,
    },

    /// The underlying record store failed
    Storage {
        message: String,
    },

    /// Configuration could not be loaded or parsed
    Config {
        message: String,
    },

    /// The request body was structurally valid but unusable
    InvalidRequest {
        message: String,
    },

    /// Internal errors that should not happen in normal operation
    Internal(String),
}

impl fmt::Display for ErpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErpError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            ErpError::Storage { message } => write!(f, "Storage failure: {}", message),
            ErpError::Config { message } => write!(f, "Configuration error: {}", message),
            ErpError::InvalidRequest { message } => write!(f, "Invalid request: {}", message),
            ErpError::Internal(message) => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for ErpError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErpError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErpError::NotFound { .. } => StatusCode::NOT_FOUND,
            ErpError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ErpError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ErpError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ErpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ErpError::NotFound { .. } => "NOT_FOUND",
            ErpError::Storage { .. } => "STORAGE_ERROR",
            ErpError::Config { .. } => "CONFIG_ERROR",
            ErpError::InvalidRequest { .. } => "INVALID_REQUEST",
            ErpError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ErpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// The only anyhow sources reaching handlers are the record stores, so a
// bare anyhow error maps to a storage failure.
impl From<anyhow::Error> for ErpError {
    fn from(err: anyhow::Error) -> Self {
        ErpError::Storage {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for apotheca operations
pub type ErpResult<T> = Result<T, ErpError>;
