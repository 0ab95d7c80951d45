//! Path validation
//!
//! Security checks on logical paths. These run before any object key is
//! built: the key is used directly as a store-level prefix, so an escape
//! through `..` or an empty segment could target another tenant's prefix.

use crate::error::VaultError;

/// Maximum length of a logical path in characters
pub const MAX_PATH_LENGTH: usize = 200;

const DISALLOWED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Validate a logical path
///
/// Pure function, no I/O. Rejects empty paths, parent-directory references,
/// disallowed characters, overlong paths, and repeated separators.
pub fn validate_path(path: &str) -> Result<(), VaultError> {
    if path.is_empty() {
        return Err(VaultError::InvalidPath("Path cannot be empty".to_string()));
    }

    if path.contains("..") {
        return Err(VaultError::InvalidPath(
            "Path cannot contain parent directory references (..)".to_string(),
        ));
    }

    if let Some(c) = path.chars().find(|c| DISALLOWED_CHARS.contains(c)) {
        return Err(VaultError::InvalidPath(format!(
            "Path contains disallowed character: '{}'",
            c
        )));
    }

    if path.chars().count() > MAX_PATH_LENGTH {
        return Err(VaultError::InvalidPath(format!(
            "Path length exceeds maximum of {} characters",
            MAX_PATH_LENGTH
        )));
    }

    if path.contains("//") || path.contains("\\\\") {
        return Err(VaultError::InvalidPath(
            "Path cannot have repeated slashes (// or \\\\)".to_string(),
        ));
    }

    Ok(())
}

/// Validate an uploaded filename
///
/// Filenames may contain `/` (bulk folder uploads target nested keys), so
/// they go through the same path rules after the blank check.
pub fn validate_filename(filename: &str) -> Result<(), VaultError> {
    if filename.trim().is_empty() {
        return Err(VaultError::InvalidPath(
            "File name can't be empty or consist of spaces".to_string(),
        ));
    }
    validate_path(filename)
}
