//! Persistent search index storage
//!
//! Caches the built full-text index so later startups skip the rebuild. Uses a
//! two-file approach, one pair per export path:
//! - `<export>.index`: bincode-serialized [`FullTextIndex`](crate::search::FullTextIndex)
//! - `<export>.index.meta.json`: JSON metadata (format version, source size/mtime)
//!
//! With [`IndexLocation::Cache`] the pair lives in a platform cache directory instead,
//! under a subdirectory named after a hash of the canonical export path:
//! - macOS: `~/Library/Caches/chat-archive-explorer/<hash>/`
//! - Linux: `~/.cache/chat-archive-explorer/<hash>/`
//! - Windows: `%LOCALAPPDATA%\chat-archive-explorer\<hash>\`
//!
//! Any failure to load is recoverable: [`restore_or_build`] falls back to a rebuild.

pub mod metadata;
pub mod persistence;

pub use metadata::{INDEX_FORMAT_VERSION, IndexMetadata, SourceFileMetadata};
pub use persistence::{IndexLocation, IndexStore, SidecarStore, restore_or_build};
