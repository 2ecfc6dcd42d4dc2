use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use imgdrop_core::AppError;
use imgdrop_processing::{TranscodeDecision, TranscodePolicy};
use imgdrop_storage::StoredFile;

use crate::error::HttpAppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::utils::upload::{store_multipart_file, FILE_FIELD};

/// Upload handler
///
/// Streams the `file` part to disk under a generated name, then applies the
/// transcode policy to its declared MIME type:
/// - raster images are converted to WebP and the original is removed after
///   the response is sent;
/// - SVG and WebP uploads are kept as-is;
/// - anything else is deleted and rejected with 415.
///
/// # Errors
/// - `AppError::MissingFile` - no `file` part in the form (400)
/// - `AppError::PayloadTooLarge` - body over the configured limit (413)
/// - `AppError::UnsupportedMediaType` - not an image (415)
/// - `AppError::Upload` - disk or transcode failure (500)
#[tracing::instrument(
    skip(state, multipart),
    fields(operation = "upload_file", filename = tracing::field::Empty)
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, HttpAppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload is not a multipart form");
        AppError::MissingFile
    })?;

    let stored = store_multipart_file(&mut multipart, FILE_FIELD, state.storage.as_ref())
        .await?
        .ok_or(AppError::MissingFile)?;

    tracing::Span::current().record("filename", stored.filename.as_str());

    match TranscodePolicy::decide(&stored.content_type) {
        TranscodeDecision::Keep => Ok(Json(ApiResponse::uploaded(stored.filename))),
        TranscodeDecision::Reject => {
            remove_stored(&state, &stored).await;
            Err(AppError::UnsupportedMediaType(stored.content_type).into())
        }
        TranscodeDecision::Transcode => transcode_stored(&state, stored).await.map(Json),
    }
}

async fn transcode_stored(
    state: &AppState,
    stored: StoredFile,
) -> Result<ApiResponse, HttpAppError> {
    let output = match state
        .transcoder
        .transcode(&stored.path, state.storage.base_path())
        .await
    {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(
                error = %e,
                filename = %stored.filename,
                content_type = %stored.content_type,
                "Transcoding failed"
            );
            remove_stored(state, &stored).await;
            return Err(e.into());
        }
    };

    let image_name = output
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            AppError::Upload(format!(
                "Transcoder produced an unnamed file: {}",
                output.display()
            ))
        })?;

    // An upload already named `.webp` (any case) was overwritten in place
    if output != stored.path {
        state
            .cleanup
            .schedule_delete(state.storage.clone(), stored.filename);
    }

    Ok(ApiResponse::uploaded(image_name))
}

/// Best-effort removal of an upload that will not be kept.
async fn remove_stored(state: &AppState, stored: &StoredFile) {
    if let Err(e) = state.storage.delete(&stored.filename).await {
        tracing::error!(
            error = %e,
            filename = %stored.filename,
            "Failed to remove rejected upload"
        );
    }
}
