//! Mapping of application errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::shared::{AppError, DomainError};

/// HTTP status for an application error
pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        AppError::Domain(DomainError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
        AppError::Domain(DomainError::Forbidden(_)) => StatusCode::FORBIDDEN,
        AppError::Infra(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ApiResponse::<()>::error(self.to_string());
        (status, Json(body)).into_response()
    }
}
