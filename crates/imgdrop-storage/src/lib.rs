//! imgdrop storage library
//!
//! Storage abstraction and the local filesystem implementation used for
//! uploaded files.
//!
//! # Filenames
//!
//! Stored files are addressed by a flat, generated filename
//! (`{prefix}-{unix_millis}{ext}`) inside a single upload directory. Names must
//! not contain path separators or `..`. Generation and validation are
//! centralized in the `naming` module.

pub mod local;
pub mod naming;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{ByteStream, FileStream, Storage, StorageError, StorageResult, StoredFile};
