//! Logical path handling
//!
//! Validation of user-supplied paths and translation between logical paths
//! and object-store keys.

pub mod keys;
pub mod validation;

pub use validation::{MAX_PATH_LENGTH, validate_filename, validate_path};
