//! Application setup and initialization
//!
//! Kept out of main.rs so tests can build the same router the binary serves.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use imgdrop_core::Config;
use imgdrop_processing::WebpTranscoder;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;
    let transcoder = Arc::new(WebpTranscoder::new(config.webp_quality));

    let state = Arc::new(AppState::new(config, storage, transcoder));
    let router = routes::build_router(state.clone())?;

    Ok((state, router))
}
