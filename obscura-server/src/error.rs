//! API error handling module
//!
//! Provides a unified error type for all API endpoints with structured error variants.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use obscura_core::{RegistryError, StoreError};

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthorized - missing or invalid caller identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable - required service is not configured or available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Registry error - error from the attestation core
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Registry(ref e) => match e {
                // Duplicate write → 409 Conflict, no state change occurred
                RegistryError::AlreadyRegistered(_) => StatusCode::CONFLICT,

                // A zero ledger clock is a host defect, not client input
                RegistryError::InvalidTimestamp(_) => StatusCode::INTERNAL_SERVER_ERROR,

                // Storage failures → 503
                RegistryError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    /// Get the error code for programmatic error handling
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Registry(ref e) => match e {
                RegistryError::AlreadyRegistered(_) => "ALREADY_REGISTERED",
                RegistryError::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
                RegistryError::Storage(_) => "STORAGE_UNAVAILABLE",
            },
        }
    }

    /// Get sanitized error message for client response
    fn client_message(&self) -> String {
        match self {
            // Storage internals stay in the logs
            Self::Registry(RegistryError::Storage(ref e)) => match e {
                StoreError::Connection(_) | StoreError::Migration(_) | StoreError::Query(_) => {
                    "Attestation storage temporarily unavailable".to_string()
                }
            },
            Self::Registry(RegistryError::InvalidTimestamp(_)) => {
                "Ledger clock produced an invalid timestamp".to_string()
            }
            // Duplicate writes echo the hash; it is the client's own input
            Self::Registry(ref e) => e.to_string(),
            // For other errors, use the Display message
            _ => self.to_string(),
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::Internal(_) => "internal",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Registry(_) => "registry",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();
        let client_message = self.client_message();

        // Log based on severity, always including internal details
        match &self {
            Self::BadRequest(_) | Self::Unauthorized(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::Registry(RegistryError::AlreadyRegistered(_)) => {
                // An expected outcome of the write-once rule; not a fault
                tracing::info!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Duplicate registration rejected"
                );
            }
            Self::ServiceUnavailable(_) | Self::Registry(RegistryError::Storage(_)) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Service unavailable"
                );
            }
            Self::Internal(_) | Self::Registry(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Server error"
                );
            }
        }

        // All error responses include a `code` field for programmatic error handling
        let body = serde_json::json!({
            "error": client_message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
