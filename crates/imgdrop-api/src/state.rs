//! Application state shared by handlers and middleware.

use imgdrop_core::Config;
use imgdrop_processing::ImageTranscoder;
use imgdrop_storage::Storage;
use std::sync::Arc;

use crate::services::cleanup::CleanupTasks;

#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup
    pub config: Arc<Config>,
    pub storage: Arc<dyn Storage>,
    pub transcoder: Arc<dyn ImageTranscoder>,
    /// Deferred deletions that run after the response is sent
    pub cleanup: CleanupTasks,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        transcoder: Arc<dyn ImageTranscoder>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            transcoder,
            cleanup: CleanupTasks::new(),
        }
    }
}
