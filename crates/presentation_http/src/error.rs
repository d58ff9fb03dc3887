//! API error handling
//!
//! Every failure is returned as `{"detail": "<message>"}`. Unknown speech
//! engines map to 400, malformed form input to 422 and pipeline failures
//! to 500.

use application::ApplicationError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use infrastructure::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A required form field is absent
    pub fn missing_field(name: &str) -> Self {
        Self::Unprocessable(format!("Field required: {name}"))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::UnsupportedEngine(_) => Self::BadRequest(err.to_string()),
            ApplicationError::Validation(_) | ApplicationError::Domain(_) => {
                Self::Unprocessable(err.to_string())
            },
            ApplicationError::Load(_)
            | ApplicationError::Detection(_)
            | ApplicationError::Synthesis(_)
            | ApplicationError::Storage(_)
            | ApplicationError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Unprocessable(format!("Invalid form data: {}", err.body_text()))
    }
}
