//! Resource result types
//!
//! DTOs returned by vault operations. `ResourceInfo` is derived from the
//! object key on every query and never persisted.

use std::fmt;
use std::io::Read;

use serde::Serialize;

use crate::archive::ZipFolderStream;

/// Kind of a stored resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    File,
    Directory,
}

/// Metadata for one file or directory
///
/// `path` is the tenant-relative parent directory with a trailing `/`
/// (empty for the tenant root); directories report size 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub path: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// One inbound upload payload (what the multipart layer hands over)
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub data: Box<dyn Read + Send>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Body of a download response
pub enum DownloadBody {
    /// Raw object read stream; the transport pumps it and must close it on
    /// every exit path, including client-side cancellation.
    File(Box<dyn Read + Send>),
    /// Lazily produced ZIP of a folder subtree.
    Folder(ZipFolderStream),
}

impl fmt::Debug for DownloadBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadBody::File(_) => f.write_str("DownloadBody::File(..)"),
            DownloadBody::Folder(stream) => write!(f, "DownloadBody::Folder({:?})", stream),
        }
    }
}

/// A download: suggested (percent-encoded) filename plus the byte source
#[derive(Debug)]
pub struct ResourceDownload {
    pub name: String,
    pub body: DownloadBody,
}
