//! Archive export
//!
//! Streams a folder subtree as a ZIP archive, entry by entry, with bounded
//! memory.

pub mod zip_stream;

pub use zip_stream::ZipFolderStream;
