use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use imgdrop_core::AppError;
use imgdrop_storage::StorageError;
use std::sync::Arc;

/// Serve a stored file by name. Public; no API key required.
///
/// The content type is guessed from the extension, since the declared type of
/// the upload is not kept.
#[tracing::instrument(skip(state), fields(operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, HttpAppError> {
    let Path(filename) = filename.map_err(|rejection| {
        AppError::InvalidFilename(format!("Undecodable path: {}", rejection.body_text()))
    })?;

    let file = state
        .storage
        .download_stream(&filename)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) => AppError::NotFound(filename.clone()),
            StorageError::InvalidKey(msg) => AppError::InvalidFilename(msg),
            other => AppError::Retrieve(other.to_string()),
        })?;

    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();

    let body_stream = file.stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Retrieve(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
