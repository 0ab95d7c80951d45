//! Existence oracle
//!
//! Classifies an object key as FILE, DIRECTORY, or ABSENT. Directory-ness is
//! tested first: a key can have children (implicit directory) without
//! existing as its own object, so checking the prefix first avoids false
//! negatives for directories with no explicit marker. The two probes are not
//! atomic; ABSENT means "not found at observation time".

use log::warn;

use crate::error::{StoreError, VaultError};
use crate::path::keys;
use crate::store::ObjectStore;

/// Result of classifying a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    File,
    Directory,
    Absent,
}

/// Classify a key as file, directory, or absent
pub fn classify(store: &dyn ObjectStore, key: &str) -> Result<ResourceKind, VaultError> {
    let dir_key = keys::add_dir_slash(key);
    let mut first = store.list_objects(&dir_key, false, Some(1));
    match first.next() {
        Some(Ok(_)) => return Ok(ResourceKind::Directory),
        Some(Err(e)) => return Err(VaultError::store("list", &dir_key, e)),
        None => {}
    }

    let file_key = keys::strip_dir_slash(key);
    match store.stat_object(file_key) {
        Ok(_) => Ok(ResourceKind::File),
        Err(StoreError::NotFound(_)) => Ok(ResourceKind::Absent),
        Err(e) => Err(VaultError::store("stat", file_key, e)),
    }
}

/// Classify a key, turning ABSENT into `NotFound`
///
/// `display_path` is the tenant-relative path shown to the caller.
pub fn classify_existing(
    store: &dyn ObjectStore,
    key: &str,
    display_path: &str,
) -> Result<ResourceKind, VaultError> {
    match classify(store, key)? {
        ResourceKind::Absent => {
            warn!("File or directory '{}' does not exist", key);
            Err(VaultError::NotFound(display_path.to_string()))
        }
        kind => Ok(kind),
    }
}

/// Whether a directory exists at the key (marker or at least one descendant)
pub fn folder_exists(store: &dyn ObjectStore, key: &str) -> Result<bool, VaultError> {
    let dir_key = keys::add_dir_slash(key);
    match store.list_objects(&dir_key, false, Some(1)).next() {
        Some(Ok(_)) => Ok(true),
        Some(Err(e)) => Err(VaultError::store("list", &dir_key, e)),
        None => Ok(false),
    }
}

/// Whether a file object exists at the exact key
pub fn file_exists(store: &dyn ObjectStore, key: &str) -> Result<bool, VaultError> {
    match store.stat_object(key) {
        Ok(_) => Ok(true),
        Err(StoreError::NotFound(_)) => Ok(false),
        Err(e) => Err(VaultError::store("stat", key, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Cursor;

    fn put(store: &MemoryStore, key: &str, data: &[u8]) {
        store
            .put_object(key, &mut Cursor::new(data.to_vec()), data.len() as u64, "text/plain")
            .unwrap();
    }

    #[test]
    fn file_object_classifies_as_file() {
        let store = MemoryStore::new();
        put(&store, "user-1-files/a.txt", b"hi");
        assert_eq!(classify(&store, "user-1-files/a.txt").unwrap(), ResourceKind::File);
    }

    #[test]
    fn marker_only_directory_classifies_as_directory() {
        let store = MemoryStore::new();
        put(&store, "user-1-files/empty/", b"");
        assert_eq!(
            classify(&store, "user-1-files/empty").unwrap(),
            ResourceKind::Directory
        );
    }

    #[test]
    fn implicit_directory_classifies_as_directory() {
        let store = MemoryStore::new();
        put(&store, "user-1-files/docs/a.txt", b"hi");
        assert_eq!(
            classify(&store, "user-1-files/docs").unwrap(),
            ResourceKind::Directory
        );
    }

    #[test]
    fn missing_key_classifies_as_absent() {
        let store = MemoryStore::new();
        assert_eq!(
            classify(&store, "user-1-files/nothing").unwrap(),
            ResourceKind::Absent
        );
        assert!(matches!(
            classify_existing(&store, "user-1-files/nothing", "nothing"),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn directory_wins_over_same_named_file_probe() {
        // A key with children is a directory even when no object exists at
        // the key itself.
        let store = MemoryStore::new();
        put(&store, "user-1-files/docs/inner.txt", b"x");
        assert!(folder_exists(&store, "user-1-files/docs").unwrap());
        assert!(!file_exists(&store, "user-1-files/docs").unwrap());
    }
}
