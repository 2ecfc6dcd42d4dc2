//! Storage abstraction trait
//!
//! This module defines the Storage trait that the upload directory backend implements.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid filename: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of file chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// A file that has been written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name the file is addressed by
    pub filename: String,
    pub path: PathBuf,
    /// MIME type declared by the uploader (untrusted)
    pub content_type: String,
    pub size_bytes: u64,
}

/// An opened file ready to be streamed back.
pub struct FileStream {
    pub size_bytes: u64,
    pub stream: ByteStream,
}

/// Storage abstraction trait
///
/// Files live in a single flat directory and are addressed by filename.
/// Every method validates the filename before touching the filesystem.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an upload from a stream under a freshly generated filename.
    ///
    /// The generated name keeps the extension of `original_filename`. A
    /// partially written file is removed if the stream fails.
    async fn store_stream(
        &self,
        original_filename: &str,
        content_type: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StorageResult<StoredFile>;

    /// Open a file as a stream of chunks
    async fn download_stream(&self, filename: &str) -> StorageResult<FileStream>;

    /// Delete a file. Returns `false` when there was nothing to delete.
    async fn delete(&self, filename: &str) -> StorageResult<bool>;

    /// Filesystem path of `filename` inside the storage directory.
    fn path_of(&self, filename: &str) -> StorageResult<PathBuf>;

    /// Root directory of the store.
    fn base_path(&self) -> &Path;
}
