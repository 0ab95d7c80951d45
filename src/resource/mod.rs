//! Resource management
//!
//! Directory emulation over the flat store: existence classification, tree
//! enumeration, uploads, downloads, directory create/delete, and search.

pub mod existence;
pub mod listing;
pub mod operations;
pub mod results;

pub use existence::ResourceKind;
pub use operations::ResourceManager;
pub use results::{DownloadBody, ResourceDownload, ResourceInfo, ResourceType, UploadFile};
