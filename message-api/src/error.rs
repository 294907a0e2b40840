//! HTTP error mapping.
//!
//! Handlers return `Result<T, ApiError>`; the [`IntoResponse`] impl turns each
//! failure into the `{"status":"error","detail":...}` envelope with the
//! matching status code. Storage and other internal failures are logged in
//! full but answered with a generic detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use message_core::{AuthError, FieldError, ServiceError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body or query string could not be decoded at all.
    #[error("malformed request: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    fn new(detail: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            status: "error",
            detail: detail.into(),
            errors,
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::MissingCredential) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::InvalidCredential) => StatusCode::FORBIDDEN,
            ApiError::Service(ServiceError::Validation(_)) | ApiError::Malformed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Service(ServiceError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::Service(ServiceError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Auth(e) => ErrorBody::new(e.to_string(), Vec::new()),
            ApiError::Service(ServiceError::Validation(errors)) => {
                ErrorBody::new("validation failed", errors.fields().to_vec())
            }
            ApiError::Service(ServiceError::Conflict { message_id }) => ErrorBody::new(
                format!("message_id already exists: {}", message_id),
                Vec::new(),
            ),
            ApiError::Service(ServiceError::Internal(detail)) => {
                error!(detail = %detail, "internal server error");
                ErrorBody::new("internal server error", Vec::new())
            }
            ApiError::Malformed(detail) => ErrorBody::new(detail, Vec::new()),
        };
        (status, Json(body)).into_response()
    }
}
