//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use convhub_converter::{CommandError, ConversionError};
use convhub_core::error::{AppError, ErrorKind};
use convhub_templates::CatalogError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wrapper so `AppError` can be returned from handlers.
///
/// `AppError` lives in `convhub-core`, which has no HTTP dependency, so the
/// orphan rule keeps `IntoResponse` on this side.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err.into())
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        Self(err.into())
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                code = err.code(),
                error = %err.message,
                "Request failed"
            );
        } else {
            tracing::debug!(code = err.code(), error = %err.message, "Request rejected");
        }

        let body = ApiErrorResponse {
            error: err.code().to_string(),
            message: err.message.clone(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
