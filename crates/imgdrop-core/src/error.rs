//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`]; internal
//! details stay in the variant payload and only reach the server log.

use std::io;

use crate::messages;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected requests worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (never contains internal details)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Forbidden: invalid or missing API key")]
    Forbidden,

    #[error("No file provided in multipart field 'file'")]
    MissingFile,

    #[error("Filename is required")]
    MissingFilename,

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Retrieve failed: {0}")]
    Retrieve(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Variant name, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Forbidden => "Forbidden",
            AppError::MissingFile => "MissingFile",
            AppError::MissingFilename => "MissingFilename",
            AppError::InvalidFilename(_) => "InvalidFilename",
            AppError::NotFound(_) => "NotFound",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Upload(_) => "Upload",
            AppError::Retrieve(_) => "Retrieve",
            AppError::Delete(_) => "Delete",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }

    /// Full message including internal details, for logs only.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Forbidden => (403, "FORBIDDEN", LogLevel::Warn),
        AppError::MissingFile => (400, "MISSING_FILE", LogLevel::Debug),
        AppError::MissingFilename => (400, "MISSING_FILENAME", LogLevel::Debug),
        AppError::InvalidFilename(_) => (400, "INVALID_FILENAME", LogLevel::Warn),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::UnsupportedMediaType(_) => (415, "UNSUPPORTED_MEDIA_TYPE", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::Upload(_) => (500, "UPLOAD_FAILED", LogLevel::Error),
        AppError::Retrieve(_) => (500, "RETRIEVE_FAILED", LogLevel::Error),
        AppError::Delete(_) => (500, "DELETE_FAILED", LogLevel::Error),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", LogLevel::Error)
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Forbidden => messages::FORBIDDEN.to_string(),
            AppError::MissingFile => messages::UPLOAD_MISSING_FILE.to_string(),
            AppError::MissingFilename => messages::DELETE_MISSING_FILENAME.to_string(),
            AppError::InvalidFilename(_) => messages::INVALID_FILENAME.to_string(),
            AppError::NotFound(name) => messages::file_not_found(name),
            AppError::UnsupportedMediaType(mime) => messages::unsupported_media_type(mime),
            AppError::PayloadTooLarge(_) => messages::UPLOAD_TOO_LARGE.to_string(),
            AppError::Upload(_) => messages::UPLOAD_FAILED.to_string(),
            AppError::Retrieve(_) => messages::RETRIEVE_FAILED.to_string(),
            AppError::Delete(_) => messages::DELETE_FAILED.to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                messages::INTERNAL_ERROR.to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
