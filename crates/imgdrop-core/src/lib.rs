//! imgdrop core library
//!
//! Configuration, error types and the user-facing message catalogue shared by
//! the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod messages;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
