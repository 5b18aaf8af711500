//! Error types for the admin API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use custos_directory::DirectoryError;
use custos_license::LicenseError;
use custos_quota::QuotaError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the admin API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The system-wide write-access flag is off.
    #[error("Write access is disabled")]
    Restricted,

    /// The tenant's enabled-account ceiling was hit.
    #[error("Quota exceeded (limit {limit})")]
    QuotaExceeded { limit: i64, message: String },

    /// An uploaded license document was rejected.
    #[error("License rejected: {message}")]
    LicenseRejected {
        message: &'static str,
        expired: bool,
    },

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// A collaborator could not be reached; detail goes to the log only.
    #[error("Communication failure: {0}")]
    Communication(String),

    /// Anything else; detail goes to the log only.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<QuotaError> for ApiError {
    fn from(error: QuotaError) -> Self {
        let message = error.public_message();
        match error {
            QuotaError::Exceeded { limit, .. } => Self::QuotaExceeded { limit, message },
            QuotaError::Directory(e) => e.into(),
        }
    }
}

impl From<LicenseError> for ApiError {
    fn from(error: LicenseError) -> Self {
        if error.is_rejection() {
            Self::LicenseRejected {
                message: error.public_message(),
                expired: matches!(error, LicenseError::Expired { .. }),
            }
        } else {
            match error {
                LicenseError::Directory(e) => e.into(),
                other => Self::Internal(other.to_string()),
            }
        }
    }
}

impl From<custos_events::EventError> for ApiError {
    fn from(error: custos_events::EventError) -> Self {
        use custos_events::EventError;
        match error {
            EventError::Apply(e) => e.into(),
            other @ (EventError::UnknownType { .. }
            | EventError::MissingType
            | EventError::Malformed(_)) => Self::Validation(other.to_string()),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::NotFound(detail) => Self::NotFound(detail),
            other => Self::Communication(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::Restricted => (
                StatusCode::FORBIDDEN,
                "write_access_disabled",
                "Write access is disabled: the installed license does not permit further changes."
                    .to_string(),
            ),
            ApiError::QuotaExceeded { message, .. } => {
                (StatusCode::FORBIDDEN, "quota_exceeded", message)
            }
            ApiError::LicenseRejected { message, expired } => {
                let status = if expired {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::BAD_REQUEST
                };
                (status, "invalid_license", message.to_string())
            }
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested resource was not found.".to_string(),
            ),
            ApiError::Communication(detail) => {
                tracing::error!("Collaborator failure: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    "communication_error",
                    "A backing service could not be reached.".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
