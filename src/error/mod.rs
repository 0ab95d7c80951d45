//! Error types
//!
//! Defines domain-specific error types for the file vault core.

pub mod handlers;
pub mod types;

pub use handlers::ErrorCategory;
pub use types::{StoreError, VaultError};
