//! Filename generation and validation for stored files.

use chrono::{DateTime, Utc};

use crate::traits::{StorageError, StorageResult};

/// Extension of `original` including the leading dot, or an empty string.
///
/// Only the last path component is considered. A name whose only dot is the
/// leading one (`.bashrc`) has no extension; a trailing dot yields `"."`.
pub fn file_extension(original: &str) -> &str {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    match base.rfind('.') {
        Some(idx) if idx > 0 && base != ".." => &base[idx..],
        _ => "",
    }
}

/// Generate a stored filename: `{prefix}-{unix_millis}{ext}`.
pub fn generate_filename(prefix: &str, original: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}{}",
        prefix,
        now.timestamp_millis(),
        file_extension(original)
    )
}

/// Reject names that could escape the upload directory.
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename.contains("..")
        || filename.contains(['/', '\\', '\0'])
    {
        return Err(StorageError::InvalidKey(filename.to_string()));
    }
    Ok(())
}
