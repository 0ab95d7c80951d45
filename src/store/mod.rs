//! Object store seam
//!
//! The raw flat key-value store the vault core is built on. The concrete
//! network client lives outside this crate; the core only relies on the
//! contract below: get/put/stat/remove by exact key, plus prefix listing as
//! the sole directory-like primitive.

pub mod memory;

use std::io::Read;

use crate::error::StoreError;

pub use memory::MemoryStore;

/// One listed object: key and byte size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
}

/// Metadata returned by a stat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStat {
    pub size: u64,
    pub content_type: String,
}

/// Lazy listing: failures surface per item, not for the whole enumeration
pub type ObjectIter = Box<dyn Iterator<Item = Result<ObjectEntry, StoreError>> + Send>;

/// Flat key-value object store
///
/// Implementations must surface a distinguishable not-found condition
/// (`StoreError::NotFound`) separate from other failures.
pub trait ObjectStore: Send + Sync {
    /// List objects under a key prefix.
    ///
    /// Non-recursive listing returns one entry per immediate child: files
    /// directly under the prefix, and one directory entry (key ending in `/`,
    /// size 0) per common deeper prefix. Recursive listing returns every
    /// object under the prefix. Order is unspecified.
    fn list_objects(&self, prefix: &str, recursive: bool, max_keys: Option<usize>) -> ObjectIter;

    /// Stat an exact key; `StoreError::NotFound` when the key has no object.
    fn stat_object(&self, key: &str) -> Result<ObjectStat, StoreError>;

    /// Write an object, replacing any existing one at the key.
    fn put_object(
        &self,
        key: &str,
        reader: &mut dyn Read,
        size: u64,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Open a read stream over an object's bytes.
    fn get_object(&self, key: &str) -> Result<Box<dyn Read + Send>, StoreError>;

    /// Remove an object; `StoreError::NotFound` when the key has no object.
    fn remove_object(&self, key: &str) -> Result<(), StoreError>;
}
