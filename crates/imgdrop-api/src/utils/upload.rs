//! Common utilities for file upload handlers

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use futures::TryStreamExt;
use imgdrop_core::AppError;
use imgdrop_storage::{Storage, StoredFile};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::io::StreamReader;

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// Declared type when a file part carries no Content-Type
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        // A malformed body carries no usable file
        tracing::debug!(error = %e.body_text(), "Failed to read multipart body");
        AppError::MissingFile
    }
}

/// Stream the first file part named `field_name` into storage.
///
/// Returns `Ok(None)` when the form has no such file part. Parts with another
/// name, and same-named parts without a filename, are skipped. Anything after
/// the first matching part is ignored.
pub async fn store_multipart_file(
    multipart: &mut Multipart,
    field_name: &str,
    storage: &dyn Storage,
) -> Result<Option<StoredFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(original_filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();

        // The storage error only carries text, so remember whether the body limit tripped
        let too_large = AtomicBool::new(false);
        let body = field.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large.store(true, Ordering::Relaxed);
            }
            io::Error::other(e)
        });
        let mut reader = Box::pin(StreamReader::new(body));

        return match storage
            .store_stream(&original_filename, &content_type, &mut reader)
            .await
        {
            Ok(stored) => Ok(Some(stored)),
            Err(e) if too_large.load(Ordering::Relaxed) => {
                Err(AppError::PayloadTooLarge(e.to_string()))
            }
            Err(e) => Err(AppError::Upload(e.to_string())),
        };
    }

    Ok(None)
}
