//! Tree enumeration
//!
//! Immediate-children and full-subtree listing under a key prefix, plus the
//! derived-metadata mapping used by directory listing and search. Per-item
//! failures are skipped with a warning for listing and search; delete and
//! archive export consume the raw iterators and account for every failure
//! themselves.

use log::warn;

use crate::path::keys;
use crate::resource::results::{ResourceInfo, ResourceType};
use crate::store::{ObjectEntry, ObjectIter, ObjectStore};

/// List immediate children under a directory key (one level)
pub fn list_children(store: &dyn ObjectStore, prefix_key: &str) -> ObjectIter {
    store.list_objects(&keys::add_dir_slash(prefix_key), false, None)
}

/// List the full subtree under a directory key (recursive, unordered, lazy)
pub fn list_subtree(store: &dyn ObjectStore, prefix_key: &str) -> ObjectIter {
    store.list_objects(&keys::add_dir_slash(prefix_key), true, None)
}

/// Derive `ResourceInfo` from a listed entry, tenant-relative
pub fn resource_info_for_entry(entry: &ObjectEntry, tenant_id: u64) -> ResourceInfo {
    let is_directory = entry.key.ends_with('/');
    let relative = keys::strip_tenant_prefix(&entry.key, tenant_id);
    ResourceInfo {
        path: keys::parent_of(relative).to_string(),
        name: keys::object_name(relative, is_directory),
        size: if is_directory { 0 } else { entry.size },
        resource_type: if is_directory {
            ResourceType::Directory
        } else {
            ResourceType::File
        },
    }
}

/// Collect `ResourceInfo`s for the immediate children of a directory
///
/// Unreadable entries are skipped with a warning; the directory's own marker
/// object never shows up as a child of itself.
pub fn collect_infos(
    store: &dyn ObjectStore,
    dir_key: &str,
    tenant_id: u64,
) -> Vec<ResourceInfo> {
    let dir_key = keys::add_dir_slash(dir_key);
    let mut infos = Vec::new();
    for entry in list_children(store, &dir_key) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable item in directory {}: {}", dir_key, e);
                continue;
            }
        };
        if entry.key == dir_key {
            continue;
        }
        infos.push(resource_info_for_entry(&entry, tenant_id));
    }
    infos
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
    fn children_are_one_level_and_exclude_own_marker() {
        let store = MemoryStore::new();
        put(&store, "user-7-files/docs/", b"");
        put(&store, "user-7-files/docs/a.txt", b"aaa");
        put(&store, "user-7-files/docs/sub/b.txt", b"b");

        let infos = collect_infos(&store, "user-7-files/docs", 7);
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "sub/"]);
        assert!(infos.iter().all(|i| i.path == "docs/"));
    }

    #[test]
    fn entry_metadata_is_tenant_relative() {
        let entry = ObjectEntry {
            key: "user-7-files/docs/a.txt".to_string(),
            size: 3,
        };
        let info = resource_info_for_entry(&entry, 7);
        assert_eq!(info.path, "docs/");
        assert_eq!(info.name, "a.txt");
        assert_eq!(info.size, 3);
        assert_eq!(info.resource_type, ResourceType::File);

        let dir_entry = ObjectEntry {
            key: "user-7-files/docs/sub/".to_string(),
            size: 0,
        };
        let info = resource_info_for_entry(&dir_entry, 7);
        assert_eq!(info.path, "docs/");
        assert_eq!(info.name, "sub/");
        assert_eq!(info.resource_type, ResourceType::Directory);
    }

    #[test]
    fn children_listing_is_one_level_and_normalizes_the_prefix() {
        let store = MemoryStore::new();
        put(&store, "user-7-files/docs/a.txt", b"a");
        put(&store, "user-7-files/docs/sub/b.txt", b"b");

        // Slashless prefix gets the marker slash appended before listing.
        let keys: Vec<String> = list_children(&store, "user-7-files/docs")
            .map(|e| e.unwrap().key)
            .collect();
        assert_eq!(
            keys,
            vec!["user-7-files/docs/a.txt", "user-7-files/docs/sub/"]
        );
    }

    #[test]
    fn subtree_listing_reaches_every_descendant() {
        let store = MemoryStore::new();
        put(&store, "user-7-files/docs/a.txt", b"a");
        put(&store, "user-7-files/docs/sub/b.txt", b"b");
        put(&store, "user-7-files/elsewhere.txt", b"e");

        let keys: Vec<String> = list_subtree(&store, "user-7-files/docs")
            .map(|e| e.unwrap().key)
            .collect();
        assert_eq!(
            keys,
            vec!["user-7-files/docs/a.txt", "user-7-files/docs/sub/b.txt"]
        );
    }
}
