//! Storage setup and initialization

use anyhow::{Context, Result};
use imgdrop_core::Config;
use imgdrop_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Open the upload directory, creating it if missing.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        "Initializing local storage..."
    );

    let storage = LocalStorage::new(config.upload_dir(), config.upload_filename_prefix.as_str())
        .await
        .context("Failed to initialize upload directory")?;

    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        filename_prefix = %config.upload_filename_prefix,
        "Local storage initialized successfully"
    );

    Ok(Arc::new(storage))
}
