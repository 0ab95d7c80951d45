//! Error types
//!
//! Defines the error taxonomy for the vault core and the raw store seam.

use std::fmt;
use std::io;

/// Raw object-store errors
///
/// The store must keep its "key not found" condition distinguishable from
/// every other failure; the oracle and the delete path branch on it.
#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(f, "No such key: {}", key),
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Backend(error.to_string())
    }
}

/// Vault core errors
///
/// Each variant carries one stable user-visible message via `Display` and maps
/// to one stable category (see `error::handlers`).
#[derive(Debug)]
pub enum VaultError {
    /// Malformed logical path; never retried, never wrapped.
    InvalidPath(String),
    /// File or directory absent at observation time.
    NotFound(String),
    /// An ancestor directory required by upload/create is missing.
    DirectoryNotFound(String),
    /// Name collision on create or upload.
    AlreadyExists(String),
    /// Unexpected failure talking to the object store.
    StoreUnavailable {
        operation: &'static str,
        key: String,
        message: String,
    },
}

impl VaultError {
    /// Wraps a raw store failure with the operation and key that triggered it.
    pub fn store(operation: &'static str, key: &str, error: StoreError) -> Self {
        VaultError::StoreUnavailable {
            operation,
            key: key.to_string(),
            message: error.to_string(),
        }
    }

    /// Like [`VaultError::store`], but an arbitrary message instead of a
    /// `StoreError` (archive writer failures, aggregated delete failures).
    pub fn unavailable(operation: &'static str, key: &str, message: impl Into<String>) -> Self {
        VaultError::StoreUnavailable {
            operation,
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            VaultError::NotFound(path) => write!(f, "File or directory doesn't exist: {}", path),
            VaultError::DirectoryNotFound(path) => write!(f, "Directory not found: {}", path),
            VaultError::AlreadyExists(msg) => write!(f, "Resource already exists: {}", msg),
            VaultError::StoreUnavailable {
                operation,
                key,
                message,
            } => write!(
                f,
                "Store unavailable during {} on '{}': {}",
                operation, key, message
            ),
        }
    }
}

impl std::error::Error for VaultError {}
