//! Error handlers
//!
//! Maps vault errors to the stable categories the transport layer branches on.

use crate::error::types::VaultError;
use log::error;

/// Stable status category for an error
///
/// Retries and UI messaging branch on the category alone; the `Display`
/// output of the error is the one stable message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadInput,
    NotFound,
    Conflict,
    Unavailable,
}

impl VaultError {
    /// Returns the stable category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            VaultError::InvalidPath(_) => ErrorCategory::BadInput,
            VaultError::NotFound(_) => ErrorCategory::NotFound,
            VaultError::DirectoryNotFound(_) => ErrorCategory::NotFound,
            VaultError::AlreadyExists(_) => ErrorCategory::Conflict,
            VaultError::StoreUnavailable { .. } => ErrorCategory::Unavailable,
        }
    }
}

/// Log a vault error at the request boundary
pub fn handle_error(err: &VaultError) {
    error!("Vault error ({:?}): {}", err.category(), err);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable_per_kind() {
        assert_eq!(
            VaultError::InvalidPath("x".into()).category(),
            ErrorCategory::BadInput
        );
        assert_eq!(
            VaultError::NotFound("x".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            VaultError::DirectoryNotFound("x".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            VaultError::AlreadyExists("x".into()).category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            VaultError::unavailable("stat", "k", "boom").category(),
            ErrorCategory::Unavailable
        );
    }
}
