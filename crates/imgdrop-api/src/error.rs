//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; any `AppError` (or a type that
//! converts into one) renders with its status, a generic client message and a
//! log line at the error's level.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgdrop_core::{AppError, ErrorMetadata, LogLevel};
use imgdrop_processing::TranscodeError;
use imgdrop_storage::StorageError;
use serde_json::json;

use crate::response::ApiResponse;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from imgdrop-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(name) => AppError::NotFound(name),
            StorageError::InvalidKey(msg) => AppError::InvalidFilename(msg),
            StorageError::WriteFailed(msg) => AppError::Upload(msg),
            StorageError::ReadFailed(msg) => AppError::Retrieve(msg),
            StorageError::DeleteFailed(msg) => AppError::Delete(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<TranscodeError> for HttpAppError {
    fn from(err: TranscodeError) -> Self {
        HttpAppError(AppError::Upload(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    let detail = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %detail, error_type, code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %detail, error_type, code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %detail, error_type, code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // The forbidden body carries no success flag
        if matches!(app_error, AppError::Forbidden) {
            return (status, Json(json!({ "message": app_error.client_message() })))
                .into_response();
        }

        (status, Json(ApiResponse::failure(app_error.client_message()))).into_response()
    }
}
