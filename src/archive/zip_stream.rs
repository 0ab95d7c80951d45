//! ZIP folder streaming
//!
//! Single-pass export of a folder subtree as a ZIP archive. One copy buffer
//! and one open entry at a time; memory use is independent of archive size
//! and file count. A member that cannot be opened or read is logged and
//! skipped (or left truncated when it fails mid-copy) so one bad object does
//! not abort a large download; failures of the archive writer or the sink
//! are fatal.

use std::fmt;
use std::io::{Read, Seek, Write};
use std::sync::Arc;

use log::{error, warn};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::error::VaultError;
use crate::path::keys;
use crate::resource::listing;
use crate::store::ObjectStore;

/// Lazily produced ZIP of one folder subtree
///
/// Not restartable: `write_to` consumes the stream. Entry names are member
/// keys with the folder prefix stripped; marker objects are omitted. Entries
/// appear in the store's enumeration order.
pub struct ZipFolderStream {
    store: Arc<dyn ObjectStore>,
    folder_key: String,
    buffer_size: usize,
}

impl fmt::Debug for ZipFolderStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipFolderStream")
            .field("folder_key", &self.folder_key)
            .field("buffer_size", &self.buffer_size)
            .finish_non_exhaustive()
    }
}

impl ZipFolderStream {
    pub fn new(store: Arc<dyn ObjectStore>, folder_key: &str, buffer_size: usize) -> Self {
        Self {
            store,
            folder_key: keys::add_dir_slash(folder_key),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Pump the whole archive into `sink`
    ///
    /// The `zip` writer needs `Seek` on the sink to finalize entry headers;
    /// the transport supplies a seekable body (spool, file, or cursor).
    pub fn write_to<W: Write + Seek>(self, sink: W) -> Result<(), VaultError> {
        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default();
        let mut buffer = vec![0u8; self.buffer_size];

        for entry in listing::list_subtree(self.store.as_ref(), &self.folder_key) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable item in folder {}: {}", self.folder_key, e);
                    continue;
                }
            };
            if entry.key.ends_with('/') {
                continue;
            }
            let entry_name = entry
                .key
                .strip_prefix(self.folder_key.as_str())
                .unwrap_or(entry.key.as_str());

            let mut reader = match self.store.get_object(&entry.key) {
                Ok(reader) => reader,
                Err(e) => {
                    warn!("Skipping unreadable object {} during export: {}", entry.key, e);
                    continue;
                }
            };

            zip.start_file(entry_name, options)
                .map_err(|e| VaultError::unavailable("zip", &entry.key, e.to_string()))?;

            loop {
                match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => {
                        // Sink-side failure; the archive is unrecoverable.
                        zip.write_all(&buffer[..n]).map_err(|e| {
                            VaultError::unavailable("zip", &entry.key, e.to_string())
                        })?;
                    }
                    Err(e) => {
                        // Read-side failure mid-entry; the entry stays
                        // truncated, the archive continues.
                        error!("Error adding object {} to archive: {}", entry.key, e);
                        break;
                    }
                }
            }
        }

        zip.finish()
            .map_err(|e| VaultError::unavailable("zip", &self.folder_key, e.to_string()))?;
        Ok(())
    }
}
