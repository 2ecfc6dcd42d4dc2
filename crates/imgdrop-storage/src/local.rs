use crate::naming::{generate_filename, validate_filename};
use crate::traits::{FileStream, Storage, StorageError, StorageResult, StoredFile};
use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncRead;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    filename_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Upload directory, created if missing (e.g., "uploads")
    /// * `filename_prefix` - Fixed prefix of generated filenames (e.g., "test-image")
    pub async fn new(
        base_path: impl Into<PathBuf>,
        filename_prefix: impl Into<String>,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            filename_prefix: filename_prefix.into(),
        })
    }

    async fn try_exists(path: &Path) -> StorageResult<bool> {
        fs::try_exists(path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to stat {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store_stream(
        &self,
        original_filename: &str,
        content_type: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StorageResult<StoredFile> {
        let filename = generate_filename(&self.filename_prefix, original_filename, Utc::now());
        let path = self.path_of(&filename)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let written = match tokio::io::copy(reader, &mut file).await {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(cleanup_err) = fs::remove_file(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %cleanup_err,
                        "Failed to remove partially written upload"
                    );
                }
                return Err(StorageError::WriteFailed(format!(
                    "Failed to write stream to file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            filename = %filename,
            original_filename = %original_filename,
            content_type = %content_type,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            filename,
            path,
            content_type: content_type.to_string(),
            size_bytes: written,
        })
    }

    async fn download_stream(&self, filename: &str) -> StorageResult<FileStream> {
        let path = self.path_of(filename)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()));
            }
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let meta = file.metadata().await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to stat file {}: {}", path.display(), e))
        })?;
        if !meta.is_file() {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Local storage stream read error");
                StorageError::ReadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(FileStream {
            size_bytes: meta.len(),
            stream: Box::pin(stream),
        })
    }

    async fn delete(&self, filename: &str) -> StorageResult<bool> {
        let path = self.path_of(filename)?;

        if !Self::try_exists(&path).await? {
            return Ok(false);
        }

        match fs::remove_file(&path).await {
            Ok(()) => {}
            // Removed concurrently between the existence check and the unlink
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            filename = %filename,
            "Local storage delete successful"
        );

        Ok(true)
    }

    fn path_of(&self, filename: &str) -> StorageResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.base_path.join(filename))
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }
}
