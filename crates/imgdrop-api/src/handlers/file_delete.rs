use crate::error::HttpAppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use imgdrop_core::{messages, AppError};
use imgdrop_storage::StorageError;
use std::sync::Arc;

/// Delete a stored file by name.
///
/// A missing file is a soft failure: 200 with `success: false`, unlike the
/// 404 returned on read.
#[tracing::instrument(skip(state), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse>, HttpAppError> {
    let Path(filename) = filename.map_err(|rejection| {
        AppError::InvalidFilename(format!("Undecodable path: {}", rejection.body_text()))
    })?;

    if filename.is_empty() {
        return Err(AppError::MissingFilename.into());
    }

    let removed = state
        .storage
        .delete(&filename)
        .await
        .map_err(|e| match e {
            StorageError::InvalidKey(msg) => AppError::InvalidFilename(msg),
            other => AppError::Delete(other.to_string()),
        })?;

    if removed {
        Ok(Json(ApiResponse::ok(messages::DELETE_SUCCESS)))
    } else {
        tracing::debug!(filename = %filename, "Delete requested for missing file");
        Ok(Json(ApiResponse::failure(messages::delete_not_found(&filename))))
    }
}
