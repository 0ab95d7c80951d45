//! In-memory object store
//!
//! A `BTreeMap`-backed implementation of the store seam with the same listing
//! semantics as a prefix-listing blob store: non-recursive listing folds
//! deeper keys into one directory entry per common prefix, and an object
//! whose key equals the listed prefix (a directory marker) is included.
//! Backs the demo binary and the test suite.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::RwLock;

use crate::error::StoreError;
use crate::store::{ObjectEntry, ObjectIter, ObjectStat, ObjectStore};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: String,
}

/// In-memory store; deterministic key order via `BTreeMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, markers included
    pub fn object_count(&self) -> usize {
        match self.objects.read() {
            Ok(objects) => objects.len(),
            Err(_) => 0,
        }
    }

    /// Whether an object exists at the exact key
    pub fn contains_key(&self, key: &str) -> bool {
        match self.objects.read() {
            Ok(objects) => objects.contains_key(key),
            Err(_) => false,
        }
    }
}

impl ObjectStore for MemoryStore {
    fn list_objects(&self, prefix: &str, recursive: bool, max_keys: Option<usize>) -> ObjectIter {
        let objects = match self.objects.read() {
            Ok(objects) => objects,
            Err(_) => {
                let err = StoreError::Backend("store lock poisoned".to_string());
                return Box::new(std::iter::once(Err(err)));
            }
        };

        let mut entries: Vec<ObjectEntry> = Vec::new();
        for (key, object) in objects.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            if recursive {
                entries.push(ObjectEntry {
                    key: key.clone(),
                    size: object.data.len() as u64,
                });
                continue;
            }

            let rest = &key[prefix.len()..];
            match rest.find('/') {
                // Deeper object: one directory entry per common prefix.
                Some(slash) => {
                    let dir_key = format!("{}{}", prefix, &rest[..=slash]);
                    if entries.last().map(|e| e.key.as_str()) != Some(dir_key.as_str()) {
                        entries.push(ObjectEntry {
                            key: dir_key,
                            size: 0,
                        });
                    }
                }
                None => entries.push(ObjectEntry {
                    key: key.clone(),
                    size: object.data.len() as u64,
                }),
            }
        }

        if let Some(limit) = max_keys {
            entries.truncate(limit);
        }
        Box::new(entries.into_iter().map(Ok))
    }

    fn stat_object(&self, key: &str) -> Result<ObjectStat, StoreError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        match objects.get(key) {
            Some(object) => Ok(ObjectStat {
                size: object.data.len() as u64,
                content_type: object.content_type.clone(),
            }),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    fn put_object(
        &self,
        key: &str,
        reader: &mut dyn Read,
        size: u64,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let mut data = Vec::with_capacity(size as usize);
        reader.read_to_end(&mut data)?;
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Box<dyn Read + Send>, StoreError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        match objects.get(key) {
            Some(object) => Ok(Box::new(Cursor::new(object.data.clone()))),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    fn remove_object(&self, key: &str) -> Result<(), StoreError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        match objects.remove(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }
}
