//! Resource operations
//!
//! The vault facade: validates logical paths, builds tenant-scoped keys, and
//! drives the oracle/enumerator/mutator sequences against the raw store.
//! Check-then-act sequences are deliberately lock-free: the store offers no
//! cross-call transaction, so an in-process lock would not bind a second
//! process or a retried request. ABSENT/exists answers hold at observation
//! time only.

use std::io::empty;
use std::sync::Arc;

use log::{error, info, warn};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::archive::ZipFolderStream;
use crate::config::VaultConfig;
use crate::error::{StoreError, VaultError};
use crate::path::keys;
use crate::path::{validate_filename, validate_path};
use crate::resource::existence::{self, ResourceKind};
use crate::resource::listing;
use crate::resource::results::{
    DownloadBody, ResourceDownload, ResourceInfo, ResourceType, UploadFile,
};
use crate::store::ObjectStore;

const DIRECTORY_CONTENT_TYPE: &str = "application/x-directory";

/// Bytes percent-encoded in suggested download filenames
const FILENAME_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'\\')
    .add(b'?');

/// Per-tenant file/folder view over the flat object store
pub struct ResourceManager {
    store: Arc<dyn ObjectStore>,
    config: VaultConfig,
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

fn encode_filename(name: &str) -> String {
    utf8_percent_encode(name, FILENAME_ENCODE).to_string()
}

impl ResourceManager {
    pub fn new(store: Arc<dyn ObjectStore>, config: VaultConfig) -> Self {
        Self { store, config }
    }

    /// List the immediate children of a directory
    ///
    /// The empty path (or `/`) addresses the tenant root, which is always
    /// listable; any other path must classify as a directory.
    pub fn list_directory(
        &self,
        tenant_id: u64,
        path: &str,
    ) -> Result<Vec<ResourceInfo>, VaultError> {
        let dir_key = if is_root(path) {
            keys::tenant_prefix(tenant_id)
        } else {
            validate_path(path)?;
            let key = keys::to_key(tenant_id, path);
            if !existence::folder_exists(self.store.as_ref(), &key)? {
                warn!("Directory '{}' does not exist", key);
                return Err(VaultError::NotFound(path.to_string()));
            }
            key
        };

        let infos = listing::collect_infos(self.store.as_ref(), &dir_key, tenant_id);
        info!("Retrieved {} items from {}", infos.len(), dir_key);
        Ok(infos)
    }

    /// Create an explicitly empty directory
    ///
    /// Writes a zero-byte marker object at `path + "/"`. Every strict
    /// ancestor must already exist; the key must not resolve to anything.
    pub fn create_directory(
        &self,
        tenant_id: u64,
        path: &str,
    ) -> Result<ResourceInfo, VaultError> {
        validate_path(path)?;
        let relative = keys::add_dir_slash(path.trim_start_matches('/'));
        let key = keys::to_key(tenant_id, &relative);

        match existence::classify(self.store.as_ref(), &key)? {
            ResourceKind::File => {
                return Err(VaultError::AlreadyExists(format!(
                    "A file already exists at: {}",
                    keys::strip_dir_slash(&relative)
                )));
            }
            ResourceKind::Directory => {
                return Err(VaultError::AlreadyExists(format!(
                    "Directory already exists: {}",
                    relative
                )));
            }
            ResourceKind::Absent => {}
        }

        let ancestors = keys::ancestor_dirs(&relative);
        for ancestor in &ancestors[..ancestors.len().saturating_sub(1)] {
            let ancestor_key = keys::to_key(tenant_id, ancestor);
            if !existence::folder_exists(self.store.as_ref(), &ancestor_key)? {
                return Err(VaultError::DirectoryNotFound(ancestor.clone()));
            }
        }

        self.store
            .put_object(&key, &mut empty(), 0, DIRECTORY_CONTENT_TYPE)
            .map_err(|e| {
                error!("Error creating folder '{}': {}", key, e);
                VaultError::store("put", &key, e)
            })?;
        info!("Folder '{}' created", key);

        Ok(ResourceInfo {
            path: keys::parent_of(&relative).to_string(),
            name: keys::object_name(&relative, true),
            size: 0,
            resource_type: ResourceType::Directory,
        })
    }

    /// Resolve a path to its derived metadata
    pub fn get_info(&self, tenant_id: u64, path: &str) -> Result<ResourceInfo, VaultError> {
        validate_path(path)?;
        let relative = path.trim_start_matches('/');
        let key = keys::to_key(tenant_id, relative);

        match existence::classify_existing(self.store.as_ref(), &key, relative)? {
            ResourceKind::Directory => Ok(ResourceInfo {
                path: keys::parent_of(relative).to_string(),
                name: keys::object_name(relative, true),
                size: 0,
                resource_type: ResourceType::Directory,
            }),
            ResourceKind::File | ResourceKind::Absent => {
                let file_key = keys::strip_dir_slash(&key);
                let stat = self.store.stat_object(file_key).map_err(|e| match e {
                    StoreError::NotFound(_) => VaultError::NotFound(relative.to_string()),
                    e => {
                        error!("Error getting info for '{}': {}", file_key, e);
                        VaultError::store("stat", file_key, e)
                    }
                })?;
                Ok(ResourceInfo {
                    path: keys::parent_of(relative).to_string(),
                    name: keys::object_name(relative, false),
                    size: stat.size,
                    resource_type: ResourceType::File,
                })
            }
        }
    }

    /// Upload a batch of files into a destination directory
    ///
    /// The destination chain must exist before any byte is forwarded; each
    /// file's exact key must not already hold a file. A `/` in a filename
    /// targets a nested key under the destination; only the base destination
    /// is pre-validated (bulk folder uploads rely on this).
    pub fn upload_files(
        &self,
        tenant_id: u64,
        dest_path: &str,
        files: Vec<UploadFile>,
    ) -> Result<Vec<ResourceInfo>, VaultError> {
        let dest_relative = if is_root(dest_path) {
            String::new()
        } else {
            validate_path(dest_path)?;
            keys::add_dir_slash(dest_path.trim_start_matches('/'))
        };

        if files.is_empty() {
            return Err(VaultError::InvalidPath(
                "Uploaded files are empty".to_string(),
            ));
        }

        // Tenant root itself is implicit; everything below it must exist.
        for ancestor in keys::ancestor_dirs(&dest_relative) {
            let ancestor_key = keys::to_key(tenant_id, &ancestor);
            if !existence::folder_exists(self.store.as_ref(), &ancestor_key)? {
                return Err(VaultError::DirectoryNotFound(ancestor));
            }
        }

        let max_bytes = self.config.max_file_size_bytes();
        let mut uploaded = Vec::with_capacity(files.len());
        for mut file in files {
            validate_filename(&file.filename)?;
            if file.size > max_bytes {
                return Err(VaultError::InvalidPath(format!(
                    "File '{}' size exceeds the {}MB limit",
                    file.filename, self.config.max_file_size_mb
                )));
            }

            let full_relative = format!(
                "{}{}",
                dest_relative,
                file.filename.trim_start_matches('/')
            );
            let full_key = keys::to_key(tenant_id, &full_relative);
            let name = keys::object_name(&full_relative, false);
            let parent = keys::parent_of(&full_relative).to_string();

            if existence::file_exists(self.store.as_ref(), &full_key)? {
                return Err(VaultError::AlreadyExists(format!(
                    "File '{}' already exists in directory: {}",
                    name, parent
                )));
            }

            self.store
                .put_object(&full_key, &mut *file.data, file.size, &file.content_type)
                .map_err(|e| {
                    error!("Error uploading file '{}': {}", full_key, e);
                    VaultError::store("put", &full_key, e)
                })?;
            info!("File '{}' uploaded to: {}", name, full_key);

            uploaded.push(ResourceInfo {
                path: parent,
                name,
                size: file.size,
                resource_type: ResourceType::File,
            });
        }

        Ok(uploaded)
    }

    /// Open a download for a file or a folder
    ///
    /// Directories stream as a ZIP; the suggested name gets a `.zip` suffix
    /// and URL-safe percent-encoding either way.
    pub fn download(&self, tenant_id: u64, path: &str) -> Result<ResourceDownload, VaultError> {
        validate_path(path)?;
        let relative = path.trim_start_matches('/');
        let key = keys::to_key(tenant_id, relative);
        let filename = keys::object_name(relative, false);

        match existence::classify_existing(self.store.as_ref(), &key, relative)? {
            ResourceKind::Directory => Ok(ResourceDownload {
                name: format!("{}.zip", encode_filename(&filename)),
                body: DownloadBody::Folder(ZipFolderStream::new(
                    Arc::clone(&self.store),
                    &key,
                    self.config.buffer_size,
                )),
            }),
            ResourceKind::File | ResourceKind::Absent => {
                let file_key = keys::strip_dir_slash(&key);
                let reader = self.store.get_object(file_key).map_err(|e| match e {
                    StoreError::NotFound(_) => VaultError::NotFound(relative.to_string()),
                    e => {
                        error!("Error downloading file '{}': {}", file_key, e);
                        VaultError::store("get", file_key, e)
                    }
                })?;
                Ok(ResourceDownload {
                    name: encode_filename(&filename),
                    body: DownloadBody::File(reader),
                })
            }
        }
    }

    /// Delete a file or a whole directory subtree
    ///
    /// Directory deletion is best effort: every member is attempted; if any
    /// removal fails the call reports failure so the caller knows the
    /// subtree may be partially deleted. No rollback exists.
    pub fn delete(&self, tenant_id: u64, path: &str) -> Result<(), VaultError> {
        validate_path(path)?;
        let relative = path.trim_start_matches('/');
        let key = keys::to_key(tenant_id, relative);

        match existence::classify_existing(self.store.as_ref(), &key, relative)? {
            ResourceKind::Directory => self.delete_folder(&key),
            ResourceKind::File | ResourceKind::Absent => {
                let file_key = keys::strip_dir_slash(&key);
                self.store.remove_object(file_key).map_err(|e| match e {
                    StoreError::NotFound(_) => VaultError::NotFound(relative.to_string()),
                    e => {
                        error!("Error deleting file '{}': {}", file_key, e);
                        VaultError::store("remove", file_key, e)
                    }
                })?;
                info!("File '{}' deleted", file_key);
                Ok(())
            }
        }
    }

    fn delete_folder(&self, key: &str) -> Result<(), VaultError> {
        let dir_key = keys::add_dir_slash(key);
        let mut attempted = 0usize;
        let mut failures: Vec<String> = Vec::new();

        for entry in listing::list_subtree(self.store.as_ref(), &dir_key) {
            attempted += 1;
            match entry {
                Ok(entry) => {
                    match self.store.remove_object(&entry.key) {
                        Ok(()) => {}
                        // Already gone; the goal state holds.
                        Err(StoreError::NotFound(_)) => {}
                        Err(e) => {
                            error!("Error deleting member '{}': {}", entry.key, e);
                            failures.push(entry.key);
                        }
                    }
                }
                Err(e) => {
                    error!("Unreadable member while deleting '{}': {}", dir_key, e);
                    failures.push(format!("<unlisted member under {}>", dir_key));
                }
            }
        }

        if !failures.is_empty() {
            return Err(VaultError::unavailable(
                "remove",
                &dir_key,
                format!(
                    "{} of {} members could not be deleted, first: {}",
                    failures.len(),
                    attempted,
                    failures[0]
                ),
            ));
        }

        info!("Folder '{}' deleted ({} objects removed)", dir_key, attempted);
        Ok(())
    }

    /// Case-insensitive substring search on object names under the tenant
    pub fn search(&self, tenant_id: u64, query: &str) -> Result<Vec<ResourceInfo>, VaultError> {
        if query.trim().is_empty() {
            return Err(VaultError::InvalidPath(
                "Search query cannot be empty".to_string(),
            ));
        }

        let prefix = keys::tenant_prefix(tenant_id);
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        let mut scanned = 0usize;

        for entry in listing::list_subtree(self.store.as_ref(), &prefix) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable item during search in {}: {}", prefix, e);
                    continue;
                }
            };
            if entry.key == prefix {
                continue;
            }
            scanned += 1;

            let is_directory = entry.key.ends_with('/');
            let name = keys::object_name(&entry.key, is_directory);
            if keys::strip_dir_slash(&name).to_lowercase().contains(&needle) {
                matches.push(listing::resource_info_for_entry(&entry, tenant_id));
            }
        }

        info!(
            "Found {} matches for '{}' under {} ({} items scanned)",
            matches.len(),
            query,
            prefix,
            scanned
        );
        Ok(matches)
    }
}
