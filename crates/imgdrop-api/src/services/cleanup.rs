//! Best-effort deferred cleanup.
//!
//! Deletions scheduled here run after the response is sent. A failure is
//! logged and never reaches the client, and nothing guarantees a task finishes
//! before the process exits: shutdown only waits for a bounded grace period.

use imgdrop_storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;

/// Grace period granted to pending cleanups on shutdown
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
pub struct CleanupTasks {
    tracker: TaskTracker,
}

impl CleanupTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task that deletes `filename` from `storage`.
    pub fn schedule_delete(&self, storage: Arc<dyn Storage>, filename: String) {
        self.tracker.spawn(async move {
            match storage.delete(&filename).await {
                Ok(true) => {
                    tracing::debug!(filename = %filename, "Deferred cleanup removed file");
                }
                Ok(false) => {
                    tracing::debug!(filename = %filename, "Deferred cleanup: file already gone");
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        filename = %filename,
                        "Deferred cleanup failed to remove file"
                    );
                }
            }
        });
    }

    /// Number of cleanups still running
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Close the tracker and give running cleanups up to `grace` to finish.
    ///
    /// Returns `true` if every task completed in time.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let pending = self.pending();
        if pending > 0 {
            tracing::info!(pending, "Waiting for deferred cleanups");
        }

        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    pending = self.pending(),
                    grace_ms = grace.as_millis() as u64,
                    "Deferred cleanups did not finish before shutdown"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgdrop_storage::LocalStorage;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_scheduled_delete_runs() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path(), "test-image").await.unwrap());
        let stored = storage
            .store_stream("a.jpg", "image/jpeg", &mut Cursor::new(b"bytes".to_vec()))
            .await
            .unwrap();

        let cleanup = CleanupTasks::new();
        cleanup.schedule_delete(storage.clone(), stored.filename.clone());

        assert!(cleanup.shutdown(Duration::from_secs(5)).await);
        assert!(!stored.path.exists());
        assert_eq!(cleanup.pending(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path(), "test-image").await.unwrap());

        let cleanup = CleanupTasks::new();
        cleanup.schedule_delete(storage, "never-uploaded.jpg".to_string());

        assert!(cleanup.shutdown(Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_shutdown_with_nothing_pending() {
        assert!(CleanupTasks::new().shutdown(Duration::from_millis(10)).await);
    }
}
